use super::lister::{DirLister, EntryKind, TokioLister};
use super::{FolderIndex, IndexError, IndexProgress, SkipReason};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Depth used when the caller has no preference. Matches the sorter's default.
pub const DEFAULT_MAX_DEPTH: usize = 5;

const PROGRESS_UPDATE_INTERVAL: usize = 25; // Report every 25 folders
const YIELD_INTERVAL: usize = 16; // Yield to the runtime every 16 listings

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOptions {
    /// Exclusive bound on listing depth. The root is listed at depth 0, so
    /// `0` lists nothing and `1` returns only the root's own subfolders.
    pub max_depth: usize,
    /// Record and descend into symlinked directories. Off by default.
    pub follow_symlinks: bool,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            follow_symlinks: false,
        }
    }
}

/// One pending directory on the work stack.
struct Frame {
    path: PathBuf,
    depth: usize,
    /// Canonical paths of the listed directories above this one. Only
    /// filled when symlinks are followed.
    ancestors: Vec<PathBuf>,
}

/// Builds the list of destination folders below a root directory.
///
/// The walk is sequential and pre-order. A directory that cannot be listed
/// is still part of the result (its parent saw it) but contributes no
/// descendants; the failure is recorded in [`FolderIndex::skipped`].
pub struct FolderIndexer<L = TokioLister> {
    options: IndexOptions,
    lister: L,
}

impl FolderIndexer<TokioLister> {
    pub fn new(options: IndexOptions) -> Self {
        Self::with_lister(options, TokioLister)
    }
}

impl<L: DirLister> FolderIndexer<L> {
    pub fn with_lister(options: IndexOptions, lister: L) -> Self {
        Self { options, lister }
    }

    pub fn options(&self) -> &IndexOptions {
        &self.options
    }

    pub async fn index(&self, root: &Path) -> Result<FolderIndex, IndexError> {
        let cancel_flag = Arc::new(AtomicBool::new(false));
        self.index_with_progress(root, cancel_flag, |_| {}).await
    }

    /// Indexes `root`, reporting progress and checking `cancel_flag` before
    /// every directory listing.
    pub async fn index_with_progress<F>(
        &self,
        root: &Path,
        cancel_flag: Arc<AtomicBool>,
        progress_callback: F,
    ) -> Result<FolderIndex, IndexError>
    where
        F: Fn(IndexProgress) + Send + Sync,
    {
        validate_root(root)?;

        let max_depth = self.options.max_depth;
        tracing::info!("📂 Indexing {:?} (max depth {})", root, max_depth);

        progress_callback(IndexProgress {
            folders_found: 0,
            current_path: root.display().to_string(),
        });

        let mut index = FolderIndex::default();
        let mut stack = vec![Frame {
            path: root.to_path_buf(),
            depth: 0,
            ancestors: Vec::new(),
        }];
        let mut listings = 0usize;

        while let Some(frame) = stack.pop() {
            if cancel_flag.load(Ordering::Relaxed) {
                tracing::info!(
                    "🛑 Indexing cancelled after {} folders",
                    index.folders.len()
                );
                return Err(IndexError::Cancelled);
            }

            // Everything but the root was discovered by its parent's listing.
            if frame.depth > 0 {
                index.folders.push(frame.path.clone());
                if index.folders.len() % PROGRESS_UPDATE_INTERVAL == 0 {
                    progress_callback(IndexProgress {
                        folders_found: index.folders.len(),
                        current_path: frame.path.display().to_string(),
                    });
                }
            }

            if frame.depth >= max_depth {
                continue;
            }

            // A loop exists only when a directory resolves to one of its own
            // ancestors. Two paths to the same directory are both walked.
            let mut ancestors = Vec::new();
            if self.options.follow_symlinks {
                match self.lister.canonicalize(&frame.path).await {
                    Ok(canonical) => {
                        if frame.ancestors.contains(&canonical) {
                            index.skip(frame.path, SkipReason::SymlinkCycle);
                            continue;
                        }
                        ancestors = frame.ancestors.clone();
                        ancestors.push(canonical);
                    }
                    Err(e) => {
                        index.skip(frame.path, SkipReason::from(&e));
                        continue;
                    }
                }
            }

            let entries = match self.lister.list(&frame.path).await {
                Ok(entries) => entries,
                Err(e) => {
                    index.skip(frame.path, SkipReason::from(&e));
                    continue;
                }
            };

            let mut children: Vec<_> = entries
                .into_iter()
                .filter(|entry| match entry.kind {
                    EntryKind::Directory => true,
                    EntryKind::SymlinkToDirectory => self.options.follow_symlinks,
                    EntryKind::Other => false,
                })
                .map(|entry| entry.name)
                .collect();
            children.sort();

            // Reversed so the first child by name is popped first.
            for name in children.into_iter().rev() {
                stack.push(Frame {
                    path: frame.path.join(name),
                    depth: frame.depth + 1,
                    ancestors: ancestors.clone(),
                });
            }

            listings += 1;
            if listings % YIELD_INTERVAL == 0 {
                tokio::task::yield_now().await;
            }
        }

        tracing::info!(
            "✅ Indexed {} folders ({} skipped)",
            index.folders.len(),
            index.skipped.len()
        );

        progress_callback(IndexProgress {
            folders_found: index.folders.len(),
            current_path: format!("Indexing complete. {} folders found", index.folders.len()),
        });

        Ok(index)
    }
}

/// Indexes the folders below `root` with default options and the given depth.
pub async fn index_folders(root: &Path, max_depth: usize) -> Result<FolderIndex, IndexError> {
    let options = IndexOptions {
        max_depth,
        ..IndexOptions::default()
    };
    FolderIndexer::new(options).index(root).await
}

fn validate_root(root: &Path) -> Result<(), IndexError> {
    if root.as_os_str().is_empty() {
        return Err(IndexError::EmptyRoot);
    }
    if !root.is_absolute() {
        return Err(IndexError::RelativeRoot(root.to_path_buf()));
    }
    Ok(())
}
