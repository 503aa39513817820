pub mod settings;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::{IndexOptions, DEFAULT_MAX_DEPTH};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub max_depth: usize,
    pub follow_symlinks: bool,
    /// The folder tree most recently indexed as a sorting destination.
    pub last_target_folder: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        settings::load_config()
    }

    pub fn index_options(&self) -> IndexOptions {
        IndexOptions {
            max_depth: self.max_depth,
            follow_symlinks: self.follow_symlinks,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            follow_symlinks: false,
            last_target_folder: None,
        }
    }
}
