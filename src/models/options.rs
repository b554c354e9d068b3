//! Options for a single cleaning run
//!
//! `CleanOptions` is the raw bundle handed over by the CLI or any other
//! caller. It is validated exactly once into a `ResolvedOptions`, before any
//! file is touched.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use super::layout::DateLayout;
use crate::error::{CleanerError, CleanerResult};

/// Default per-line buffer cap (10 MiB)
pub const DEFAULT_MAX_LINE_BYTES: usize = 10 * 1024 * 1024;

/// Smallest per-line buffer cap accepted (1 MiB)
pub const MIN_MAX_LINE_BYTES: usize = 1024 * 1024;

/// Input bundle for one cleaning run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanOptions {
    /// Log file to clean in place
    pub path: PathBuf,
    /// Maximum number of entries to keep
    pub max_rows: usize,
    /// Oldest timestamp to keep, written in `date_format`
    pub min_date: Option<String>,
    /// Timestamp layout; empty disables grouping and date filtering
    pub date_format: String,
    /// Entries containing any of these substrings are dropped
    pub exclude: Vec<String>,
    /// Per-line buffer cap for the reader
    pub max_line_bytes: usize,
}

impl CleanOptions {
    /// Create options that only trim by entry count
    pub fn new(path: impl Into<PathBuf>, max_rows: usize) -> Self {
        Self {
            path: path.into(),
            max_rows,
            min_date: None,
            date_format: String::new(),
            exclude: Vec::new(),
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }

    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }

    pub fn with_min_date(mut self, min_date: impl Into<String>) -> Self {
        self.min_date = Some(min_date.into());
        self
    }

    pub fn with_exclude<I, S>(mut self, stubs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = stubs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_line_bytes(mut self, max_line_bytes: usize) -> Self {
        self.max_line_bytes = max_line_bytes;
        self
    }

    /// Validate the whole bundle
    pub fn resolve(&self) -> CleanerResult<ResolvedOptions> {
        if self.max_rows == 0 {
            return Err(CleanerError::Validation(
                "max rows must be a positive number".into(),
            ));
        }

        if self.max_line_bytes < MIN_MAX_LINE_BYTES {
            return Err(CleanerError::Validation(format!(
                "line buffer must be at least {} bytes, got {}",
                MIN_MAX_LINE_BYTES, self.max_line_bytes
            )));
        }

        let layout = if self.date_format.is_empty() {
            None
        } else {
            Some(DateLayout::new(&self.date_format)?)
        };

        let min_date_input = self
            .min_date
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let (min_date, ignored_min_date) = match (min_date_input, &layout) {
            (Some(input), Some(layout)) => {
                let parsed = layout
                    .parse_timestamp(input)
                    .ok_or_else(|| CleanerError::date_parse(input, layout.source()))?;
                (Some(parsed), None)
            }
            (Some(input), None) => (None, Some(input.to_string())),
            (None, _) => (None, None),
        };

        let exclude = self
            .exclude
            .iter()
            .filter(|stub| !stub.is_empty())
            .cloned()
            .collect();

        Ok(ResolvedOptions {
            path: self.path.clone(),
            max_rows: self.max_rows,
            layout,
            min_date,
            ignored_min_date,
            exclude,
            max_line_bytes: self.max_line_bytes,
        })
    }
}

/// Validated options, ready for the engine
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    path: PathBuf,
    max_rows: usize,
    layout: Option<DateLayout>,
    min_date: Option<NaiveDateTime>,
    ignored_min_date: Option<String>,
    exclude: Vec<String>,
    max_line_bytes: usize,
}

impl ResolvedOptions {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn max_rows(&self) -> usize {
        self.max_rows
    }

    pub fn layout(&self) -> Option<&DateLayout> {
        self.layout.as_ref()
    }

    /// Minimum timestamp; only set when date filtering is active
    pub fn min_date(&self) -> Option<NaiveDateTime> {
        self.min_date
    }

    /// A minimum date given without a layout to read it with
    pub fn ignored_min_date(&self) -> Option<&str> {
        self.ignored_min_date.as_deref()
    }

    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }

    pub fn max_line_bytes(&self) -> usize {
        self.max_line_bytes
    }
}
