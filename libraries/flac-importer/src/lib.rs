//! FLAC Player Importer
//!
//! Discovers FLAC files under a directory tree and merges their metadata
//! into the catalog.
//!
//! - [`LibraryScanner`] walks a root, filters by extension and runs the
//!   metadata gateway on every file the catalog does not know yet. It never
//!   touches the catalog itself.
//! - [`LibraryContext`] owns the catalog and its cache document and applies
//!   scan results to them.

pub mod context;
pub mod error;
pub mod scanner;

pub use context::{LibraryContext, ScanReport};
pub use error::{ImportError, Result};
pub use scanner::{LibraryScanner, ScanOutcome, ScanProgress};
