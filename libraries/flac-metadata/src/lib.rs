//! FLAC Player Metadata
//!
//! Metadata gateway for FLAC Player: turns one audio file into a `Track`.
//!
//! # Example
//!
//! ```rust,no_run
//! use flac_core::MetadataExtractor;
//! use flac_metadata::LoftyMetadataExtractor;
//! use std::path::Path;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = LoftyMetadataExtractor::new();
//! let track = extractor.extract(Path::new("/music/song.flac")).await?;
//! println!("{} - {} ({:.0}s)", track.artist, track.title, track.duration);
//! # Ok(())
//! # }
//! ```

mod error;
mod reader;

pub use error::{MetadataError, Result};
pub use reader::LoftyMetadataExtractor;
