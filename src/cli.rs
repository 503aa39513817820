//! Command-line arguments and output rendering for the `folder-indexer` binary.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::core::{FolderCatalog, IndexOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One absolute folder path per line
    List,
    /// The full catalog as pretty-printed JSON
    Json,
    /// An ASCII tree of the indexed folders
    Tree,
}

/// Index the folders below a directory for LLM-assisted file sorting
#[derive(Parser, Debug, Clone)]
#[command(
    name = "folder-indexer",
    version,
    about = "Index the folders below a directory for LLM-assisted file sorting",
    after_help = "EXAMPLES:\n    \
        folder-indexer ~/Archive\n    \
        folder-indexer ~/Archive --max-depth 2 --format tree\n    \
        folder-indexer /mnt/share --format json --timeout-secs 30 > catalog.json"
)]
pub struct CliArgs {
    /// Directory whose subfolders become sorting destinations
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Exclusive listing depth; 1 returns only the root's own subfolders
    /// [default: from config, else 5]
    #[arg(short = 'd', long, value_name = "NUM")]
    pub max_depth: Option<usize>,

    /// Record and descend into symlinked directories
    #[arg(long, overrides_with = "no_follow_symlinks")]
    pub follow_symlinks: bool,

    /// Ignore symlinked directories even if the saved settings follow them
    #[arg(long, overrides_with = "follow_symlinks")]
    pub no_follow_symlinks: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::List)]
    pub format: OutputFormat,

    /// Abandon the run after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Do not read or update the saved settings
    #[arg(long)]
    pub no_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Command-line flags win over saved settings.
    pub fn index_options(&self, config: &AppConfig) -> IndexOptions {
        let saved = config.index_options();
        let follow_symlinks = if self.follow_symlinks {
            true
        } else if self.no_follow_symlinks {
            false
        } else {
            saved.follow_symlinks
        };
        IndexOptions {
            max_depth: self.max_depth.unwrap_or(saved.max_depth),
            follow_symlinks,
        }
    }
}

pub fn render(catalog: &FolderCatalog, format: OutputFormat) -> Result<String> {
    let output = match format {
        OutputFormat::List => catalog
            .folders
            .iter()
            .map(|p| format!("{}\n", p.display()))
            .collect(),
        OutputFormat::Json => catalog.to_json()? + "\n",
        OutputFormat::Tree => catalog.render_tree(),
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FolderIndex;

    #[test]
    fn depth_flag_overrides_saved_depth() {
        let args = CliArgs::parse_from(["folder-indexer", "/archive", "--max-depth", "2"]);
        let config = AppConfig {
            max_depth: 7,
            ..AppConfig::default()
        };

        assert_eq!(args.index_options(&config).max_depth, 2);
    }

    #[test]
    fn saved_settings_apply_when_flags_are_absent() {
        let args = CliArgs::parse_from(["folder-indexer", "/archive"]);
        let config = AppConfig {
            max_depth: 3,
            follow_symlinks: true,
            ..AppConfig::default()
        };

        let options = args.index_options(&config);

        assert_eq!(options.max_depth, 3);
        assert!(options.follow_symlinks);
        assert_eq!(args.format, OutputFormat::List);
    }

    #[test]
    fn no_follow_flag_overrides_saved_symlink_setting() {
        let config = AppConfig {
            follow_symlinks: true,
            ..AppConfig::default()
        };

        let args = CliArgs::parse_from(["folder-indexer", "/archive", "--no-follow-symlinks"]);
        assert!(!args.index_options(&config).follow_symlinks);

        // The last of the two flags wins.
        let args = CliArgs::parse_from([
            "folder-indexer",
            "/archive",
            "--no-follow-symlinks",
            "--follow-symlinks",
        ]);
        assert!(args.index_options(&config).follow_symlinks);
    }

    #[test]
    fn negative_depth_is_rejected() {
        let result = CliArgs::try_parse_from(["folder-indexer", "/archive", "--max-depth", "-1"]);
        assert!(result.is_err());

        let result = CliArgs::try_parse_from(["folder-indexer", "/archive", "-d", "2.5"]);
        assert!(result.is_err());
    }

    #[test]
    fn list_format_prints_one_path_per_line() {
        let index = FolderIndex {
            folders: vec![PathBuf::from("/archive/a"), PathBuf::from("/archive/a/b")],
            skipped: vec![],
        };
        let catalog = FolderCatalog::new(PathBuf::from("/archive"), 2, index);

        let output = render(&catalog, OutputFormat::List).unwrap();

        assert_eq!(output, "/archive/a\n/archive/a/b\n");
    }
}
