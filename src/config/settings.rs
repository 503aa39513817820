use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use super::AppConfig;
use crate::core::DEFAULT_MAX_DEPTH;

const APP_NAME: &str = "FolderIndexer";
const CONFIG_FILE: &str = "config.json";

/// Returns the platform-specific configuration directory for the application.
pub fn get_config_directory() -> Option<PathBuf> {
    ProjectDirs::from("com", "folderindexer", APP_NAME)
        .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
}

/// Returns the full path to the configuration file.
pub fn get_config_file_path() -> Option<PathBuf> {
    get_config_directory().map(|dir| dir.join(CONFIG_FILE))
}

/// Loads the configuration from the platform config directory.
pub fn load_config() -> Result<AppConfig> {
    let config_path = get_config_file_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    load_config_from(&config_path)
}

/// Loads the configuration from `config_path`.
///
/// A missing file is created with defaults. Legacy sorter settings and files
/// that do not parse go through the legacy migration, and failing that are
/// replaced in memory by the defaults so a broken file never blocks indexing.
pub fn load_config_from(config_path: &Path) -> Result<AppConfig> {
    if !config_path.exists() {
        tracing::info!(
            "Config file not found, creating default config at {:?}",
            config_path
        );
        let default_config = AppConfig::default();
        save_config_to(&default_config, config_path)?;
        return Ok(default_config);
    }

    let config_content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file {config_path:?}"))?;

    let is_legacy = serde_json::from_str::<Value>(&config_content)
        .is_ok_and(|value| value.get("sorterMaxDepth").is_some());
    if is_legacy {
        tracing::info!("Found legacy sorter settings at {:?}", config_path);
        return Ok(migrate_legacy_config(&config_content).unwrap_or_default());
    }

    match serde_json::from_str::<AppConfig>(&config_content) {
        Ok(config) => {
            tracing::info!("Loaded config from {:?}", config_path);
            Ok(config)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse config file at {:?}: {}. Falling back to default config.",
                config_path,
                e
            );
            Ok(migrate_legacy_config(&config_content).unwrap_or_default())
        }
    }
}

/// Reads settings written by the earlier desktop sorter.
///
/// That format kept camelCase keys and stored the depth as whatever the
/// number input held, so a zero, negative or fractional `sorterMaxDepth`
/// becomes the default depth just as the sorter UI treated it.
fn migrate_legacy_config(config_content: &str) -> Result<AppConfig> {
    let value: Value = serde_json::from_str(config_content)?;
    let obj = value
        .as_object()
        .ok_or_else(|| anyhow::anyhow!("Config is not a JSON object"))?;

    let max_depth = obj
        .get("sorterMaxDepth")
        .or_else(|| obj.get("max_depth"))
        .and_then(Value::as_u64)
        .filter(|depth| *depth > 0)
        .and_then(|depth| usize::try_from(depth).ok())
        .unwrap_or(DEFAULT_MAX_DEPTH);

    let folder = |key: &str| obj.get(key).and_then(Value::as_str).map(PathBuf::from);

    let migrated_config = AppConfig {
        max_depth,
        follow_symlinks: obj
            .get("follow_symlinks")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        last_target_folder: folder("last_target_folder").or_else(|| folder("targetFolder")),
    };
    tracing::info!("Successfully migrated legacy config");
    Ok(migrated_config)
}

/// Saves the configuration to the platform config directory.
pub fn save_config(config: &AppConfig) -> Result<()> {
    let config_path = get_config_file_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    save_config_to(config, &config_path)
}

/// Saves the configuration to `config_path`, creating parent directories.
pub fn save_config_to(config: &AppConfig, config_path: &Path) -> Result<()> {
    if let Some(config_dir) = config_path.parent() {
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)
                .with_context(|| format!("Failed to create config directory {config_dir:?}"))?;
            tracing::info!("Created config directory: {:?}", config_dir);
        }
    }

    let config_json = serde_json::to_string_pretty(config)?;
    fs::write(config_path, config_json)
        .with_context(|| format!("Failed to write config file {config_path:?}"))?;
    tracing::info!("Saved config to {:?}", config_path);

    Ok(())
}

// Platform-specific configuration paths for reference:
// macOS:   ~/Library/Application Support/com.folderindexer.FolderIndexer/
// Linux:   ~/.config/folderindexer/
// Windows: %APPDATA%/folderindexer/FolderIndexer/config/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nested/config.json");

        let config = load_config_from(&path).unwrap();

        assert_eq!(config, AppConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn saved_config_loads_back() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.json");
        let config = AppConfig {
            max_depth: 3,
            follow_symlinks: true,
            last_target_folder: Some(PathBuf::from("/archive")),
        };

        save_config_to(&config, &path).unwrap();

        assert_eq!(load_config_from(&path).unwrap(), config);
    }

    #[test]
    fn partial_file_is_filled_with_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, r#"{ "max_depth": 2 }"#).unwrap();

        let config = load_config_from(&path).unwrap();

        assert_eq!(config.max_depth, 2);
        assert!(!config.follow_symlinks);
    }

    #[test]
    fn legacy_sorter_settings_are_migrated() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.json");
        fs::write(
            &path,
            r#"{ "sorterMaxDepth": 3, "targetFolder": "/archive", "theme": "dark" }"#,
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();

        assert_eq!(config.max_depth, 3);
        assert_eq!(config.last_target_folder, Some(PathBuf::from("/archive")));
    }

    #[test]
    fn unusable_depths_fall_back_to_the_default() {
        for raw in ["-2", "0", "2.5", "\"five\""] {
            let content = format!(r#"{{ "sorterMaxDepth": {raw} }}"#);
            let config = migrate_legacy_config(&content).unwrap();
            assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH, "input {raw}");
        }
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(load_config_from(&path).unwrap(), AppConfig::default());
    }
}
