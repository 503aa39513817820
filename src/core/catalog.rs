//! The destination catalog handed to the sorter, plus an ASCII preview of it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{FolderIndex, SkippedDir};

/// A finished indexing run, ready to be serialized for the sorter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderCatalog {
    pub root: PathBuf,
    pub max_depth: usize,
    pub indexed_at: DateTime<Utc>,
    pub folders: Vec<PathBuf>,
    pub skipped: Vec<SkippedDir>,
}

impl FolderCatalog {
    pub fn new(root: PathBuf, max_depth: usize, index: FolderIndex) -> Self {
        Self {
            root,
            max_depth,
            indexed_at: Utc::now(),
            folders: index.folders,
            skipped: index.skipped,
        }
    }

    /// Folder paths relative to the root, in catalog order.
    pub fn relative_folders(&self) -> Vec<PathBuf> {
        self.folders
            .iter()
            .map(|p| p.strip_prefix(&self.root).unwrap_or(p).to_path_buf())
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Renders the catalogued folders as an ASCII tree.
    pub fn render_tree(&self) -> String {
        let mut children: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
        for path in self.relative_folders() {
            let parent = path.parent().unwrap_or(Path::new("")).to_path_buf();
            children.entry(parent).or_default().push(path);
        }

        let root_name = self
            .root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.root.display().to_string());

        let mut result = format!("{root_name}/\n");
        Self::render_children(&children, Path::new(""), &mut result, "");
        result
    }

    fn render_children(
        children: &BTreeMap<PathBuf, Vec<PathBuf>>,
        parent: &Path,
        result: &mut String,
        prefix: &str,
    ) {
        let Some(nodes) = children.get(parent) else {
            return;
        };
        let mut sorted: Vec<&PathBuf> = nodes.iter().collect();
        sorted.sort();

        for (i, path) in sorted.iter().enumerate() {
            let is_last = i == sorted.len() - 1;
            let connector = if is_last { "└── " } else { "├── " };
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            result.push_str(&format!("{prefix}{connector}{name}\n"));

            let new_prefix = if is_last {
                format!("{prefix}    ")
            } else {
                format!("{prefix}│   ")
            };
            Self::render_children(children, path, result, &new_prefix);
        }
    }
}
