//! Storage layer for logcleaner
//!
//! Bounded line reading from the snapshot and atomic replacement of the
//! target file.

pub mod file_io;
pub mod reader;

pub use file_io::{ensure_file_exists, replace_atomic, EntryWriter, LineWriter};
pub use reader::{read_lines, read_lines_from};
