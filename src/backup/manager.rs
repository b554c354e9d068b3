//! Backup manager for logcleaner
//!
//! Snapshots the source log next to itself before any mutation. Backups are
//! named `<path>.<YYYY-MM-DD-HH-MM-SS>.bak` and are left behind for the caller
//! to manage.

use std::ffi::OsString;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::{CleanerError, CleanerResult};

/// Timestamp component of backup file names
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// Metadata about a backup
#[derive(Debug, Clone)]
pub struct BackupInfo {
    /// Full path to backup
    pub path: PathBuf,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Creates snapshots of a single log file
pub struct BackupManager {
    /// File being protected
    source: PathBuf,
}

impl BackupManager {
    /// Create a new BackupManager for the given log file
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// File being protected
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Deterministic backup name for a capture time
    pub fn backup_path_for(&self, created_at: &DateTime<Local>) -> PathBuf {
        self.with_suffix(&format!(
            ".{}.bak",
            created_at.format(BACKUP_TIMESTAMP_FORMAT)
        ))
    }

    /// Create a byte-identical copy of the source
    ///
    /// Returns information about the created backup. An earlier backup from
    /// the same second is never overwritten: a `-1`, `-2`, ... suffix is
    /// added to the timestamp instead.
    pub fn create_backup(&self) -> CleanerResult<BackupInfo> {
        let metadata = fs::metadata(&self.source).map_err(|e| {
            CleanerError::Backup(format!("Failed to stat {}: {}", self.source.display(), e))
        })?;

        if !metadata.is_file() {
            return Err(CleanerError::Backup(format!(
                "{} is not a regular file",
                self.source.display()
            )));
        }

        let created_at = Local::now();
        let backup_path = self.free_backup_path(&created_at);

        let size_bytes = fs::copy(&self.source, &backup_path).map_err(|e| {
            // Never leave a partial snapshot that looks like a real one
            let _ = fs::remove_file(&backup_path);
            CleanerError::Backup(format!(
                "Failed to copy {} to {}: {}",
                self.source.display(),
                backup_path.display(),
                e
            ))
        })?;

        File::open(&backup_path)
            .and_then(|file| file.sync_all())
            .map_err(|e| CleanerError::Backup(format!("Failed to sync backup file: {}", e)))?;

        tracing::info!(backup = %backup_path.display(), size_bytes, "created backup");

        Ok(BackupInfo {
            path: backup_path,
            size_bytes,
        })
    }

    fn free_backup_path(&self, created_at: &DateTime<Local>) -> PathBuf {
        let candidate = self.backup_path_for(created_at);
        if !candidate.exists() {
            return candidate;
        }

        let stamp = created_at.format(BACKUP_TIMESTAMP_FORMAT).to_string();
        (1..)
            .map(|n| self.with_suffix(&format!(".{}-{}.bak", stamp, n)))
            .find(|path| !path.exists())
            .unwrap_or(candidate)
    }

    fn with_suffix(&self, suffix: &str) -> PathBuf {
        let mut name = OsString::from(self.source.as_os_str());
        name.push(suffix);
        PathBuf::from(name)
    }
}
