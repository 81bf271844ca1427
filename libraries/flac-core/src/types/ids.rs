/// ID types for FLAC Player entities
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of generated track identifiers
const TRACK_ID_LEN: usize = 10;

/// Track identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    /// Create a new track ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random track ID (10 alphanumeric characters)
    pub fn generate() -> Self {
        let id = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TRACK_ID_LEN)
            .map(char::from)
            .collect();
        Self(id)
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the ID is empty (never true for generated IDs)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_alphanumeric() {
        let id = TrackId::generate();
        assert_eq!(id.as_str().len(), TRACK_ID_LEN);
        assert!(id.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(TrackId::generate(), TrackId::generate());
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&TrackId::new("abc123")).unwrap();
        assert_eq!(json, "\"abc123\"");
    }
}
