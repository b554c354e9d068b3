//! logcleaner - Trim text log files in place, safely
//!
//! This library keeps the most recent entries of a log file and discards the
//! rest. Lines can be grouped into multi-line entries by a leading timestamp,
//! filtered by content or by minimum date, and the result replaces the
//! original atomically. A timestamped backup is taken first and restored if
//! anything fails along the way.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (lines, entries, date layouts, options)
//! - `storage`: Line reading and atomic file replacement
//! - `backup`: Snapshot creation and rollback
//! - `services`: Grouping, filtering, trimming and the cleaning pipeline
//! - `display`: Terminal formatting of status messages
//! - `cli`: Command handlers for the `logcleaner` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use logcleaner::{clean_log, CleanOptions};
//!
//! let options = CleanOptions::new("/var/log/app.log", 1000)
//!     .with_date_format("2006-01-02 15:04:05")
//!     .with_exclude(["healthcheck"]);
//! let report = clean_log(options)?;
//! println!("kept {} entries", report.entries_written);
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{CleanerError, CleanerResult};
pub use models::CleanOptions;
pub use services::{clean_log, CleanReport, LogCleaner};
