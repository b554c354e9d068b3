//! Log lines and logical log entries

use chrono::NaiveDateTime;

/// A single raw line as read from the source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// 1-based position in the source file
    pub number: usize,
    /// Line content without the trailing newline
    pub text: String,
}

impl LogLine {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// One logical log record, possibly merged from several raw lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Merged text, constituent lines joined by a single space
    text: String,
    /// Timestamp parsed from the first line, if it had one
    timestamp: Option<NaiveDateTime>,
    /// Source line number of the first line
    first_line: usize,
    /// Number of raw lines merged into this entry
    line_count: usize,
}

impl Entry {
    /// Start a new entry from its first line
    pub fn new(line: LogLine, timestamp: Option<NaiveDateTime>) -> Self {
        Self {
            text: line.text,
            timestamp,
            first_line: line.number,
            line_count: 1,
        }
    }

    /// Append a continuation line
    pub fn push_continuation(&mut self, line: &LogLine) {
        self.text.push(' ');
        self.text.push_str(&line.text);
        self.line_count += 1;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamp
    }

    pub fn first_line(&self) -> usize {
        self.first_line
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Check if the merged text contains any of the given substrings
    pub fn contains_any<S: AsRef<str>>(&self, needles: &[S]) -> bool {
        needles
            .iter()
            .any(|needle| self.text.contains(needle.as_ref()))
    }
}
