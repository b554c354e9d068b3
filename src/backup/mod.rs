//! Backup system for logcleaner
//!
//! Every cleaning run snapshots the log before touching it and restores from
//! that snapshot if anything goes wrong afterwards.
//!
//! # Architecture
//!
//! The backup system consists of two main components:
//!
//! - `BackupManager`: Creates the timestamped sibling copy
//! - `RestoreManager`: Rolls the target back from that copy
//!
//! # Backup Format
//!
//! A backup is a byte-for-byte copy named `<path>.<YYYY-MM-DD-HH-MM-SS>.bak`
//! in the same directory as the log. It is never modified by the cleaner and
//! is left behind after a successful run.
//!
//! # Example
//!
//! ```rust,ignore
//! use logcleaner::backup::{BackupManager, RestoreManager};
//!
//! let backup = BackupManager::new("/var/log/app.log").create_backup()?;
//!
//! // ... the rewrite fails ...
//! let outcome = RestoreManager::new("/var/log/app.log").rollback(&backup.path);
//! println!("{}", outcome);
//! ```

mod manager;
mod restore;

pub use manager::{BackupInfo, BackupManager, BACKUP_TIMESTAMP_FORMAT};
pub use restore::{RestoreManager, RollbackOutcome};
