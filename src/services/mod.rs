//! Business logic layer for logcleaner
//!
//! The cleaning pipeline is split into small stages that each own one step:
//! grouping lines into entries, filtering, trimming, and the `LogCleaner`
//! service that wires them together around the backup and storage layers.

pub mod cleaner;
pub mod filter;
pub mod grouper;
pub mod report;
pub mod trimmer;

pub use cleaner::{clean_log, LogCleaner};
pub use filter::{DateFilter, DateVerdict, FilterPipeline, FilterStats};
pub use grouper::group_entries;
pub use report::{CleanEvent, CleanReport, NullReporter, StatusReporter};
pub use trimmer::trim_to_last;
