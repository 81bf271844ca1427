//! FLAC Player application
//!
//! Configuration, the headless playback engine and the interactive command
//! parser behind the `flac-player` binary.

pub mod commands;
pub mod config;
pub mod engine;
pub mod error;

pub use error::{PlayerError, Result};
