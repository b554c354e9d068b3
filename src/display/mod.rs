//! Display formatting for terminal output
//!
//! Provides utilities for formatting engine events and run summaries for
//! terminal display, including colors.

pub mod status;

pub use status::{describe_event, describe_report, paint, Tone};
