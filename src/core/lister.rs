//! The directory-listing seam the indexer walks through.

use async_trait::async_trait;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

/// How a listed entry should be treated by the indexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A real directory.
    Directory,
    /// A symbolic link whose target is a directory.
    SymlinkToDirectory,
    /// Anything else: files, sockets, broken links, links to files.
    Other,
}

/// A single entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    pub name: OsString,
    pub kind: EntryKind,
}

impl ListedEntry {
    pub fn new(name: impl Into<OsString>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Lists the immediate entries of a directory.
///
/// A listing either succeeds as a whole or fails as a whole; the indexer
/// treats a failed listing as an unreadable subtree.
#[async_trait]
pub trait DirLister: Send + Sync {
    async fn list(&self, dir: &Path) -> io::Result<Vec<ListedEntry>>;

    /// Resolves a path to its canonical form. Only consulted when symlinks
    /// are followed.
    async fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;
}

/// The production lister, backed by `tokio::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioLister;

#[async_trait]
impl DirLister for TokioLister {
    async fn list(&self, dir: &Path) -> io::Result<Vec<ListedEntry>> {
        let mut read_dir = tokio::fs::read_dir(dir).await?;
        let mut entries = Vec::new();

        while let Some(entry) = read_dir.next_entry().await? {
            // `file_type` does not follow links, so a link shows up as a link.
            let kind = match entry.file_type().await {
                Ok(ft) if ft.is_dir() => EntryKind::Directory,
                Ok(ft) if ft.is_symlink() => match tokio::fs::metadata(entry.path()).await {
                    Ok(target) if target.is_dir() => EntryKind::SymlinkToDirectory,
                    _ => EntryKind::Other,
                },
                Ok(_) => EntryKind::Other,
                Err(e) => {
                    tracing::debug!("Could not determine type of {:?}: {}", entry.path(), e);
                    EntryKind::Other
                }
            };
            entries.push(ListedEntry::new(entry.file_name(), kind));
        }

        Ok(entries)
    }

    async fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        tokio::fs::canonicalize(path).await
    }
}
