//! Backup restoration for logcleaner
//!
//! Restores a target file from its backup after a failed run, keeping the
//! backup itself in place so a later attempt can be retried.

use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// How a rollback ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollbackOutcome {
    /// Target restored and backup preserved
    Restored,
    /// Target restored, but the backup could not be moved back into its slot.
    /// The backup content survives at `safety_copy`.
    RestoredWithoutBackup { safety_copy: PathBuf, reason: String },
    /// The backup could not be moved over the target.
    /// Both the backup and a safety copy are left for inspection.
    RestoreFailed { reason: String },
    /// The safety copy could not be created; nothing was touched.
    /// This needs manual intervention.
    SafetyCopyFailed { reason: String },
}

impl RollbackOutcome {
    /// Check if the target holds its pre-run content again
    pub fn is_restored(&self) -> bool {
        matches!(self, Self::Restored | Self::RestoredWithoutBackup { .. })
    }

    /// Check if this is the unrecoverable case
    pub fn is_critical(&self) -> bool {
        matches!(self, Self::SafetyCopyFailed { .. })
    }
}

impl fmt::Display for RollbackOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Restored => write!(f, "original restored, backup kept"),
            Self::RestoredWithoutBackup {
                safety_copy,
                reason,
            } => write!(
                f,
                "original restored, but failed to preserve backup ({}); copy left at {}",
                reason,
                safety_copy.display()
            ),
            Self::RestoreFailed { reason } => {
                write!(f, "could not move backup back into place: {}", reason)
            }
            Self::SafetyCopyFailed { reason } => {
                write!(f, "could not create safety copy: {}", reason)
            }
        }
    }
}

/// Handles restoring a target from its backup
pub struct RestoreManager {
    target: PathBuf,
}

impl RestoreManager {
    /// Create a new RestoreManager for the given target file
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
        }
    }

    /// Path of the temporary safety copy used while rolling back
    pub fn safety_copy_path(backup: &Path) -> PathBuf {
        let mut name = OsString::from(backup.as_os_str());
        name.push(".bak");
        PathBuf::from(name)
    }

    /// Restore the target from `backup` using a double copy:
    ///
    /// 1. copy the backup to a safety file
    /// 2. move the backup over the target
    /// 3. move the safety file back into the backup slot
    ///
    /// Never panics and never returns an error; the outcome says how far it got.
    pub fn rollback(&self, backup: &Path) -> RollbackOutcome {
        self.rollback_via(backup, &Self::safety_copy_path(backup))
    }

    fn rollback_via(&self, backup: &Path, safety: &Path) -> RollbackOutcome {
        tracing::info!(
            target_file = %self.target.display(),
            backup = %backup.display(),
            "rollback initiated"
        );

        if let Err(e) = fs::copy(backup, safety) {
            tracing::error!(
                safety_copy = %safety.display(),
                error = %e,
                "rollback critical failure: could not create safety copy"
            );
            return RollbackOutcome::SafetyCopyFailed {
                reason: e.to_string(),
            };
        }

        if let Err(e) = fs::rename(backup, &self.target) {
            tracing::error!(
                target_file = %self.target.display(),
                error = %e,
                "rollback failed: could not move backup back"
            );
            return RollbackOutcome::RestoreFailed {
                reason: e.to_string(),
            };
        }

        if let Err(e) = fs::rename(safety, backup) {
            tracing::warn!(
                error = %e,
                "rollback warning: original restored, but failed to preserve backup"
            );
            return RollbackOutcome::RestoredWithoutBackup {
                safety_copy: safety.to_path_buf(),
                reason: e.to_string(),
            };
        }

        tracing::info!("rollback finished");
        RollbackOutcome::Restored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_env() -> (RestoreManager, PathBuf, PathBuf, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("app.log");
        let backup = temp_dir.path().join("app.log.2024-01-01-00-00-00.bak");
        fs::write(&backup, "original\ncontent\n").unwrap();
        fs::write(&target, "half writ").unwrap();
        (RestoreManager::new(&target), target, backup, temp_dir)
    }

    #[test]
    fn test_rollback_restores_and_keeps_backup() {
        let (manager, target, backup, _temp) = create_test_env();

        let outcome = manager.rollback(&backup);

        assert_eq!(outcome, RollbackOutcome::Restored);
        assert!(outcome.is_restored());
        assert_eq!(fs::read_to_string(&target).unwrap(), "original\ncontent\n");
        assert_eq!(fs::read_to_string(&backup).unwrap(), "original\ncontent\n");
        assert!(!RestoreManager::safety_copy_path(&backup).exists());
    }

    #[test]
    fn test_rollback_recreates_missing_target() {
        let (manager, target, backup, _temp) = create_test_env();
        fs::remove_file(&target).unwrap();

        let outcome = manager.rollback(&backup);

        assert!(outcome.is_restored());
        assert_eq!(fs::read_to_string(&target).unwrap(), "original\ncontent\n");
    }

    #[test]
    fn test_rollback_can_be_repeated() {
        let (manager, target, backup, _temp) = create_test_env();

        assert!(manager.rollback(&backup).is_restored());
        fs::write(&target, "broken again").unwrap();
        assert!(manager.rollback(&backup).is_restored());

        assert_eq!(fs::read_to_string(&target).unwrap(), "original\ncontent\n");
    }

    #[test]
    fn test_rollback_without_backup_is_critical() {
        let (manager, target, backup, _temp) = create_test_env();
        fs::remove_file(&backup).unwrap();

        let outcome = manager.rollback(&backup);

        assert!(outcome.is_critical());
        assert!(!outcome.is_restored());
        // Left untouched for manual inspection
        assert_eq!(fs::read_to_string(&target).unwrap(), "half writ");
    }

    #[test]
    fn test_outcome_display() {
        let outcome = RollbackOutcome::SafetyCopyFailed {
            reason: "disk full".into(),
        };
        assert_eq!(outcome.to_string(), "could not create safety copy: disk full");
        assert_eq!(
            RollbackOutcome::Restored.to_string(),
            "original restored, backup kept"
        );
    }

    #[test]
    fn test_blocked_target_is_restore_failed() {
        let (manager, target, backup, _temp) = create_test_env();
        fs::remove_file(&target).unwrap();
        fs::create_dir(&target).unwrap();
        fs::write(target.join("occupant"), "x").unwrap();

        let outcome = manager.rollback(&backup);

        assert!(matches!(outcome, RollbackOutcome::RestoreFailed { .. }));
        assert!(!outcome.is_restored());
        assert!(!outcome.is_critical());
        // Backup and safety copy are both left behind
        assert_eq!(fs::read_to_string(&backup).unwrap(), "original\ncontent\n");
        assert_eq!(
            fs::read_to_string(RestoreManager::safety_copy_path(&backup)).unwrap(),
            "original\ncontent\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_lost_backup_slot_is_restored_without_backup() {
        let temp_dir = TempDir::new().unwrap();
        let holding = temp_dir.path().join("holding");
        fs::create_dir(&holding).unwrap();

        // The target is a symlink to the directory holding the safety copy.
        // Moving the backup over it leaves the safety copy unreachable.
        let target = temp_dir.path().join("app.log");
        std::os::unix::fs::symlink(&holding, &target).unwrap();
        let backup = temp_dir.path().join("app.log.2024-01-01-00-00-00.bak");
        fs::write(&backup, "original\n").unwrap();
        let safety = target.join("app.log.bak");

        let outcome = RestoreManager::new(&target).rollback_via(&backup, &safety);

        match &outcome {
            RollbackOutcome::RestoredWithoutBackup { safety_copy, .. } => {
                assert_eq!(safety_copy, &safety);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(outcome.is_restored());
        assert_eq!(fs::read_to_string(&target).unwrap(), "original\n");
        assert!(!backup.exists());
        assert_eq!(
            fs::read_to_string(holding.join("app.log.bak")).unwrap(),
            "original\n"
        );
    }
}
