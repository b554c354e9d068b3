//! Core data models for logcleaner
//!
//! This module contains the data structures shared by every cleaning stage:
//! raw lines, grouped entries, timestamp layouts and run options.

pub mod entry;
pub mod layout;
pub mod options;

pub use entry::{Entry, LogLine};
pub use layout::DateLayout;
pub use options::{
    CleanOptions, ResolvedOptions, DEFAULT_MAX_LINE_BYTES, MIN_MAX_LINE_BYTES,
};
