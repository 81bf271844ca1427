//! Supported audio formats

use std::path::Path;

/// Extensions accepted by the scanner and the "open files" flow
pub const SUPPORTED_EXTENSIONS: &[&str] = &["flac"];

/// Check if a path carries a supported audio extension (case-insensitive)
pub fn is_supported_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_supported_audio_file() {
        assert!(is_supported_audio_file(Path::new("/music/a.flac")));
        assert!(is_supported_audio_file(Path::new("/music/A.FLAC")));
        assert!(is_supported_audio_file(Path::new("/music/b.FlAc")));
        assert!(!is_supported_audio_file(Path::new("/music/c.txt")));
        assert!(!is_supported_audio_file(Path::new("/music/d.mp3")));
        assert!(!is_supported_audio_file(Path::new("/music/flac")));
        assert!(!is_supported_audio_file(Path::new("/music/e.flac.bak")));
    }
}
