//! Defines the custom error types for the `core` module.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for folder indexing.
///
/// Unreadable directories are never reported through this type; they end up
/// as [`SkippedDir`](super::SkippedDir) entries in the returned index. Only
/// caller mistakes and cancellation abort a run.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The root path was empty.
    #[error("Root path must not be empty")]
    EmptyRoot,

    /// The root path was relative. Catalog entries are handed to other
    /// processes, so they must be absolute.
    #[error("Root path must be absolute: {0}")]
    RelativeRoot(PathBuf),

    /// Represents a user-initiated cancellation of an operation.
    #[error("Indexing was cancelled")]
    Cancelled,
}

/// Errors raised when moving a file into a catalogued folder.
#[derive(Debug, Error)]
pub enum MoveError {
    /// The source does not exist or is not a regular file.
    #[error("Source is not a regular file: {0}")]
    SourceNotAFile(PathBuf),

    /// The destination does not exist or is not a directory.
    #[error("Destination is not a directory: {0}")]
    DestinationNotADirectory(PathBuf),

    /// A file with the same name already sits in the destination.
    #[error("Destination already contains {0}")]
    AlreadyExists(PathBuf),

    /// Represents an I/O error, typically from the rename itself.
    #[error("I/O error for path {1}: {0}")]
    Io(#[source] std::io::Error, PathBuf),
}
