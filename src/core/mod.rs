pub mod catalog;
pub mod error;
pub mod indexer;
pub mod lister;
pub mod mover;

use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;

/// Why a directory contributed nothing to the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    PermissionDenied,
    NotFound,
    NotADirectory,
    /// The directory resolves to one of its own ancestors.
    SymlinkCycle,
    Io(String),
}

impl From<&io::Error> for SkipReason {
    fn from(error: &io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            io::ErrorKind::NotFound => Self::NotFound,
            io::ErrorKind::NotADirectory => Self::NotADirectory,
            _ => Self::Io(error.to_string()),
        }
    }
}

/// A directory whose contents could not be indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDir {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// The outcome of one indexing run.
///
/// `folders` is in pre-order: every directory precedes its descendants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderIndex {
    pub folders: Vec<PathBuf>,
    pub skipped: Vec<SkippedDir>,
}

impl FolderIndex {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    fn skip(&mut self, path: PathBuf, reason: SkipReason) {
        tracing::debug!("Skipping {:?}: {:?}", path, reason);
        self.skipped.push(SkippedDir { path, reason });
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct IndexProgress {
    pub folders_found: usize,
    pub current_path: String,
}

pub use catalog::FolderCatalog;
pub use error::{IndexError, MoveError};
pub use indexer::{index_folders, FolderIndexer, IndexOptions, DEFAULT_MAX_DEPTH};
pub use lister::{DirLister, EntryKind, ListedEntry, TokioLister};
pub use mover::move_into_folder;
