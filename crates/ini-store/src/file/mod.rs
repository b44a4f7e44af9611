//! File persistence: the line-based loader and the format-preserving merger.

pub mod loader;
pub mod merger;

pub use loader::{load, load_into, parse_into};
pub use merger::{merge_with_existing, save};

use std::path::PathBuf;
use thiserror::Error;

/// Error type for settings file operations.
///
/// Malformed *content* is never an error: comment lines, blank lines, lines
/// without a `=`, and keys outside any section are all tolerated by design.
/// Only the file itself failing to read or write is reported.
#[derive(Debug, Error)]
pub enum FileError {
    /// The settings file could not be read.
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file could not be written.
    #[error("failed to write settings file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
