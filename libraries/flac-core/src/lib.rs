//! FLAC Player Core
//!
//! Platform-agnostic core types and traits shared by every FLAC Player crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackId`, `Catalog`
//! - **Core Traits**: `MetadataExtractor` (the metadata gateway seam)
//! - **Error Handling**: `ExtractionFailure`, the per-file error reported by gateways
//! - **Formats**: supported audio extensions and the matching helper
//!
//! # Example
//!
//! ```rust
//! use flac_core::{Catalog, Track};
//! use std::path::PathBuf;
//!
//! let mut catalog = Catalog::new();
//! let track = Track::new(PathBuf::from("/music/song.flac"), "My Favorite Song", "Artist");
//!
//! assert!(catalog.insert(track.clone()));
//! // Same path again is refused
//! assert!(!catalog.insert(Track::new(track.path.clone(), "Other", "Other")));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod format;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::ExtractionFailure;
pub use format::{is_supported_audio_file, SUPPORTED_EXTENSIONS};
pub use traits::MetadataExtractor;
pub use types::{Catalog, Track, TrackId};
