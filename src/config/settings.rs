//! User settings for logcleaner
//!
//! Defaults for the options the command line doesn't set explicitly.
//! Every field has a default, so a partial `config.json` is fine.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::paths::CleanerPaths;
use crate::error::CleanerError;
use crate::models::DEFAULT_MAX_LINE_BYTES;

/// User settings for logcleaner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Default timestamp layout; empty disables grouping
    #[serde(default)]
    pub date_format: String,

    /// Per-line buffer cap in bytes
    #[serde(default = "default_max_line_bytes")]
    pub max_line_bytes: usize,

    /// Substrings always excluded, in addition to any given on the command line
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Whether status output is colored
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_max_line_bytes() -> usize {
    DEFAULT_MAX_LINE_BYTES
}

fn default_color() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            date_format: String::new(),
            max_line_bytes: default_max_line_bytes(),
            exclude: Vec::new(),
            color: default_color(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_create(paths: &CleanerPaths) -> Result<Self, CleanerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            Self::load_from(&settings_path)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Load settings from an explicit file
    pub fn load_from(path: &Path) -> Result<Self, CleanerError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CleanerError::Config(format!("Failed to read settings file {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            CleanerError::Config(format!("Failed to parse settings file {}: {}", path.display(), e))
        })
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CleanerPaths) -> Result<(), CleanerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| CleanerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| CleanerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.date_format.is_empty());
        assert_eq!(settings.max_line_bytes, 10 * 1024 * 1024);
        assert!(settings.exclude.is_empty());
        assert!(settings.color);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CleanerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CleanerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            date_format: "2006-01-02 15:04:05".into(),
            exclude: vec!["healthcheck".into()],
            color: false,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.json");
        std::fs::write(&path, r#"{"date_format": "%Y-%m-%d"}"#).unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.date_format, "%Y-%m-%d");
        assert_eq!(settings.max_line_bytes, DEFAULT_MAX_LINE_BYTES);
        assert!(settings.color);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        std::fs::write(&path, "not json at all").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, CleanerError::Config(_)));
    }
}
