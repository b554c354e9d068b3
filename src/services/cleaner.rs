//! Log cleaning service
//!
//! Runs one in-place cleaning pass over a log file:
//!
//! validate → backup → read → group → exclude → date filter → trim → write
//! → rename, with a rollback from the backup if any step after the backup
//! fails.
//!
//! Runs are synchronous and single-threaded. Callers must not run two
//! cleanings against the same path at once; nothing here locks the file.

use crate::backup::{BackupInfo, BackupManager, RestoreManager};
use crate::error::CleanerResult;
use crate::models::{CleanOptions, ResolvedOptions};
use crate::storage::{ensure_file_exists, read_lines, replace_atomic, EntryWriter, LineWriter};

use super::filter::FilterPipeline;
use super::grouper::group_entries;
use super::report::{CleanEvent, CleanReport, NullReporter, StatusReporter};
use super::trimmer::trim_to_last;

/// Service for cleaning log files in place
pub struct LogCleaner {
    writer: Box<dyn EntryWriter>,
}

impl Default for LogCleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl LogCleaner {
    /// Create a cleaner that writes one entry per line
    pub fn new() -> Self {
        Self {
            writer: Box::new(LineWriter),
        }
    }

    /// Use a different serializer for the output file
    pub fn with_writer(writer: impl EntryWriter + 'static) -> Self {
        Self {
            writer: Box::new(writer),
        }
    }

    /// Clean a log file, reporting progress to `reporter`
    ///
    /// Precondition errors are returned before anything touches the disk.
    /// Any failure after the backup exists triggers a rollback; the rollback
    /// outcome is reported, and the original error is what gets returned.
    pub fn clean(
        &self,
        options: CleanOptions,
        reporter: &mut dyn StatusReporter,
    ) -> CleanerResult<CleanReport> {
        let options = options.resolve()?;

        if let Some(min_date) = options.ignored_min_date() {
            tracing::warn!(min_date, "minimum date given without a date layout, date filter skipped");
            reporter.report(&CleanEvent::MinDateIgnored {
                min_date: min_date.to_string(),
            });
        }

        let backup = BackupManager::new(options.path()).create_backup()?;
        reporter.report(&CleanEvent::BackupCreated {
            backup_path: backup.path.clone(),
            size_bytes: backup.size_bytes,
        });

        match self.process(&options, &backup, reporter) {
            Ok(report) => {
                tracing::info!(
                    path = %report.path.display(),
                    entries = report.entries_written,
                    "log cleaned"
                );
                reporter.report(&CleanEvent::Completed(report.clone()));
                Ok(report)
            }
            Err(err) if err.triggers_rollback() => {
                tracing::error!(error = %err, "cleaning failed, rolling back");
                reporter.report(&CleanEvent::RollbackStarted {
                    backup_path: backup.path.clone(),
                });
                let outcome = RestoreManager::new(options.path()).rollback(&backup.path);
                reporter.report(&CleanEvent::RollbackFinished(outcome));
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Clean a log file without progress reporting
    pub fn clean_quietly(&self, options: CleanOptions) -> CleanerResult<CleanReport> {
        self.clean(options, &mut NullReporter)
    }

    fn process(
        &self,
        options: &ResolvedOptions,
        backup: &BackupInfo,
        reporter: &mut dyn StatusReporter,
    ) -> CleanerResult<CleanReport> {
        let path = options.path();
        let lines = read_lines(&backup.path, options.max_line_bytes())?;

        if lines.is_empty() {
            ensure_file_exists(path)?;
            reporter.report(&CleanEvent::EmptyLog {
                path: path.to_path_buf(),
            });
            return Ok(CleanReport::empty(path.to_path_buf(), backup.path.clone()));
        }

        let lines_read = lines.len();
        let entries = group_entries(lines, options.layout());
        let entries_grouped = entries.len();
        reporter.report(&CleanEvent::Grouped {
            lines: lines_read,
            entries: entries_grouped,
        });

        let pipeline = FilterPipeline::from_options(options);
        let (entries, filtered) = pipeline.apply(entries);
        if pipeline.is_active() {
            reporter.report(&CleanEvent::Filtered(filtered));
        }

        let (entries, trimmed) = trim_to_last(entries, options.max_rows());
        reporter.report(&CleanEvent::Trimmed {
            removed: trimmed,
            kept: entries.len(),
        });

        replace_atomic(path, &entries, self.writer.as_ref())?;

        Ok(CleanReport {
            path: path.to_path_buf(),
            backup_path: backup.path.clone(),
            lines_read,
            entries_grouped,
            filtered,
            trimmed,
            entries_written: entries.len(),
        })
    }
}

/// Clean a log file with the default writer and no progress reporting
pub fn clean_log(options: CleanOptions) -> CleanerResult<CleanReport> {
    LogCleaner::new().clean_quietly(options)
}
