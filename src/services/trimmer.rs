//! Keeps the most recent entries

use crate::models::Entry;

/// Keep only the trailing `max_rows` entries.
///
/// Returns the kept entries in their original order and how many were cut.
pub fn trim_to_last(mut entries: Vec<Entry>, max_rows: usize) -> (Vec<Entry>, usize) {
    let excess = entries.len().saturating_sub(max_rows);
    entries.drain(..excess);
    (entries, excess)
}
