//! Filter pipeline
//!
//! Content exclusion runs first, then the minimum-date filter, so an excluded
//! entry is never date-evaluated.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::{Entry, ResolvedOptions};

/// How many entries each filter removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    /// Dropped because they contained an exclusion substring
    pub excluded: usize,
    /// Dropped by the date filter for lacking a timestamp
    pub undated: usize,
    /// Dropped by the date filter for being older than the minimum
    pub before_min_date: usize,
}

impl FilterStats {
    pub fn total(&self) -> usize {
        self.excluded + self.undated + self.before_min_date
    }
}

/// Verdict of the date filter for one entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateVerdict {
    Keep,
    Undated,
    TooOld,
}

/// Drops entries older than a minimum timestamp
#[derive(Debug, Clone, Copy)]
pub struct DateFilter {
    min_date: NaiveDateTime,
}

impl DateFilter {
    pub fn new(min_date: NaiveDateTime) -> Self {
        Self { min_date }
    }

    /// Judge an entry by the timestamp grouping parsed from its first line.
    ///
    /// Unlike grouping, which tolerates lines without a timestamp, an entry
    /// without one is never kept once date filtering is on.
    pub fn verdict(&self, entry: &Entry) -> DateVerdict {
        match entry.timestamp() {
            None => DateVerdict::Undated,
            Some(timestamp) if timestamp < self.min_date => DateVerdict::TooOld,
            Some(_) => DateVerdict::Keep,
        }
    }
}

/// Exclusion filter followed by an optional date filter
#[derive(Debug, Clone, Default)]
pub struct FilterPipeline {
    exclude: Vec<String>,
    date: Option<DateFilter>,
}

impl FilterPipeline {
    pub fn new(exclude: Vec<String>, date: Option<DateFilter>) -> Self {
        Self { exclude, date }
    }

    /// Build the pipeline a run's options ask for
    pub fn from_options(options: &ResolvedOptions) -> Self {
        Self::new(
            options.exclude().to_vec(),
            options.min_date().map(DateFilter::new),
        )
    }

    /// Check if this pipeline can drop anything at all
    pub fn is_active(&self) -> bool {
        !self.exclude.is_empty() || self.date.is_some()
    }

    /// Apply both filters, preserving the order of the survivors
    pub fn apply(&self, mut entries: Vec<Entry>) -> (Vec<Entry>, FilterStats) {
        let mut stats = FilterStats::default();

        if !self.exclude.is_empty() {
            entries.retain(|entry| {
                let excluded = entry.contains_any(&self.exclude);
                if excluded {
                    stats.excluded += 1;
                }
                !excluded
            });
        }

        if let Some(date) = &self.date {
            entries.retain(|entry| match date.verdict(entry) {
                DateVerdict::Keep => true,
                DateVerdict::Undated => {
                    stats.undated += 1;
                    false
                }
                DateVerdict::TooOld => {
                    stats.before_min_date += 1;
                    false
                }
            });
        }

        tracing::debug!(
            excluded = stats.excluded,
            undated = stats.undated,
            before_min_date = stats.before_min_date,
            remaining = entries.len(),
            "filtered entries"
        );

        (entries, stats)
    }
}
