//! Run results and status reporting
//!
//! The engine never prints. It reports progress through a `StatusReporter`
//! and returns a `CleanReport`; the CLI decides how to present both.

use std::path::PathBuf;

use serde::Serialize;

use super::filter::FilterStats;
use crate::backup::RollbackOutcome;

/// Summary of a successful run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    /// The cleaned log file
    pub path: PathBuf,
    /// Snapshot taken before the run
    pub backup_path: PathBuf,
    /// Raw lines read from the snapshot
    pub lines_read: usize,
    /// Entries after grouping
    pub entries_grouped: usize,
    /// Entries removed by each filter
    pub filtered: FilterStats,
    /// Entries cut by the row limit
    pub trimmed: usize,
    /// Entries written to the cleaned file
    pub entries_written: usize,
}

impl CleanReport {
    /// Report for a run that found nothing to do
    pub fn empty(path: PathBuf, backup_path: PathBuf) -> Self {
        Self {
            path,
            backup_path,
            lines_read: 0,
            entries_grouped: 0,
            filtered: FilterStats::default(),
            trimmed: 0,
            entries_written: 0,
        }
    }

    /// Total entries dropped by filtering and trimming
    pub fn entries_removed(&self) -> usize {
        self.filtered.total() + self.trimmed
    }
}

/// Progress events emitted during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanEvent {
    /// A minimum date was given without a layout and will not be applied
    MinDateIgnored { min_date: String },
    /// The snapshot exists; rollback is possible from here on
    BackupCreated { backup_path: PathBuf, size_bytes: u64 },
    /// The source held no lines; nothing was rewritten
    EmptyLog { path: PathBuf },
    /// Lines were grouped into entries
    Grouped { lines: usize, entries: usize },
    /// Filters ran
    Filtered(FilterStats),
    /// Oldest entries were cut to honor the row limit
    Trimmed { removed: usize, kept: usize },
    /// The run failed and the target is being restored
    RollbackStarted { backup_path: PathBuf },
    /// Restoration ended
    RollbackFinished(RollbackOutcome),
    /// The run succeeded
    Completed(CleanReport),
}

/// Receives progress events from the engine
pub trait StatusReporter {
    fn report(&mut self, event: &CleanEvent);
}

impl<F> StatusReporter for F
where
    F: FnMut(&CleanEvent),
{
    fn report(&mut self, event: &CleanEvent) {
        self(event)
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl StatusReporter for NullReporter {
    fn report(&mut self, _event: &CleanEvent) {}
}
