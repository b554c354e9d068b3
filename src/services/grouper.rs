//! Entry grouping
//!
//! Merges lines without a leading timestamp (stack traces, wrapped messages)
//! into the entry that precedes them.

use crate::models::{DateLayout, Entry, LogLine};

/// Grouping state while walking the lines in order
enum GroupState {
    /// No entry started yet
    AwaitingEntry,
    /// Continuation lines are appended to this entry
    InEntry(Entry),
}

/// Group raw lines into entries.
///
/// Without a layout every line is its own entry and no timestamp parsing
/// happens. With a layout a timestamped line always starts a new entry; any
/// other line continues the current one, or starts the first entry if there
/// is none yet.
pub fn group_entries(lines: Vec<LogLine>, layout: Option<&DateLayout>) -> Vec<Entry> {
    let Some(layout) = layout else {
        return lines.into_iter().map(|line| Entry::new(line, None)).collect();
    };

    let mut entries = Vec::new();
    let mut state = GroupState::AwaitingEntry;

    for line in lines {
        let timestamp = layout.leading_timestamp(&line.text);

        state = match (state, timestamp) {
            (GroupState::AwaitingEntry, timestamp) => {
                GroupState::InEntry(Entry::new(line, timestamp))
            }
            (GroupState::InEntry(current), Some(timestamp)) => {
                entries.push(current);
                GroupState::InEntry(Entry::new(line, Some(timestamp)))
            }
            (GroupState::InEntry(mut current), None) => {
                current.push_continuation(&line);
                GroupState::InEntry(current)
            }
        };
    }

    if let GroupState::InEntry(current) = state {
        entries.push(current);
    }

    tracing::debug!(entries = entries.len(), "grouped lines into entries");
    entries
}
