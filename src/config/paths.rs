//! Path management for logcleaner
//!
//! ## Path Resolution Order
//!
//! 1. `LOGCLEANER_CONFIG_DIR` environment variable (if set)
//! 2. The platform config directory, e.g. `~/.config/logcleaner` on Linux,
//!    `~/Library/Application Support/logcleaner` on macOS, `%APPDATA%\logcleaner`
//!    on Windows

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::CleanerError;

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "LOGCLEANER_CONFIG_DIR";

/// Manages all paths used by logcleaner
#[derive(Debug, Clone)]
pub struct CleanerPaths {
    /// Base directory for logcleaner configuration
    base_dir: PathBuf,
}

impl CleanerPaths {
    /// Create a new CleanerPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, CleanerError> {
        let base_dir = if let Ok(custom) = std::env::var(CONFIG_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            ProjectDirs::from("", "", "logcleaner")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    CleanerError::Config("Could not determine config directory".into())
                })?
        };

        Ok(Self { base_dir })
    }

    /// Create CleanerPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the config directory exists
    pub fn ensure_directories(&self) -> Result<(), CleanerError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| CleanerError::Io(format!("Failed to create config directory: {}", e)))
    }
}
