//! Status message formatting
//!
//! Turns engine events and reports into the human-readable lines printed by
//! the CLI.

use crossterm::style::{Color, Stylize};

use crate::backup::RollbackOutcome;
use crate::services::{CleanEvent, CleanReport};

/// Importance of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Step-by-step detail, shown in verbose mode only
    Detail,
    Info,
    Success,
    Warning,
    Error,
}

impl Tone {
    fn color(self) -> Option<Color> {
        match self {
            Tone::Detail => Some(Color::DarkGrey),
            Tone::Info => None,
            Tone::Success => Some(Color::Green),
            Tone::Warning => Some(Color::Yellow),
            Tone::Error => Some(Color::Red),
        }
    }

    /// Check if this line belongs on stderr
    pub fn is_problem(self) -> bool {
        matches!(self, Tone::Warning | Tone::Error)
    }
}

/// Apply the tone's color when coloring is enabled
pub fn paint(text: String, tone: Tone, color: bool) -> String {
    match tone.color() {
        Some(c) if color => text.with(c).to_string(),
        _ => text,
    }
}

/// Describe an engine event
pub fn describe_event(event: &CleanEvent) -> (Tone, String) {
    match event {
        CleanEvent::MinDateIgnored { min_date } => (
            Tone::Warning,
            format!(
                "date filter skipped: '{}' given without a date format, trimming only by entry count",
                min_date
            ),
        ),
        CleanEvent::BackupCreated {
            backup_path,
            size_bytes,
        } => (
            Tone::Detail,
            format!("backup created: {} ({} bytes)", backup_path.display(), size_bytes),
        ),
        CleanEvent::EmptyLog { path } => {
            (Tone::Warning, format!("Log {} is empty.", path.display()))
        }
        CleanEvent::Grouped { lines, entries } => (
            Tone::Detail,
            format!("grouped {} lines into {} entries", lines, entries),
        ),
        CleanEvent::Filtered(stats) => (
            Tone::Detail,
            format!(
                "filtered out {} entries ({} excluded, {} undated, {} before minimum date)",
                stats.total(),
                stats.excluded,
                stats.undated,
                stats.before_min_date
            ),
        ),
        CleanEvent::Trimmed { removed, kept } => (
            Tone::Detail,
            format!("trimmed {} oldest entries, keeping {}", removed, kept),
        ),
        CleanEvent::RollbackStarted { backup_path } => (
            Tone::Warning,
            format!("rollback initiated: restoring from {}", backup_path.display()),
        ),
        CleanEvent::RollbackFinished(outcome) => describe_rollback(outcome),
        CleanEvent::Completed(report) => (Tone::Success, describe_report(report)),
    }
}

fn describe_rollback(outcome: &RollbackOutcome) -> (Tone, String) {
    if outcome.is_critical() {
        return (
            Tone::Error,
            format!(
                "rollback critical failure: {}; manual inspection required",
                outcome
            ),
        );
    }
    if !outcome.is_restored() {
        return (Tone::Error, format!("rollback failed: {}", outcome));
    }

    match outcome {
        RollbackOutcome::Restored => (Tone::Success, "rollback finished!".to_string()),
        _ => (Tone::Warning, format!("rollback warning: {}", outcome)),
    }
}

/// One-line summary of a successful run
pub fn describe_report(report: &CleanReport) -> String {
    format!(
        "Log {} purged, {} entries removed. Backup copy at: {}. Entries: {}.",
        report.path.display(),
        report.entries_removed(),
        report.backup_path.display(),
        report.entries_written
    )
}
