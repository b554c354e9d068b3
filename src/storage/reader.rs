//! Bounded line reader
//!
//! Streams a file into newline-delimited lines, refusing any line longer
//! than the configured cap instead of truncating it.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::{CleanerError, CleanerResult};
use crate::models::LogLine;

/// Read every line of a file
pub fn read_lines<P: AsRef<Path>>(path: P, max_line_bytes: usize) -> CleanerResult<Vec<LogLine>> {
    let path = path.as_ref();

    let file = File::open(path)
        .map_err(|e| CleanerError::Read(format!("Failed to open {}: {}", path.display(), e)))?;

    read_lines_from(BufReader::new(file), max_line_bytes)
}

/// Read every line from a buffered reader.
///
/// The trailing `\n` and a `\r` right before it are stripped; everything
/// else is kept byte for byte. A final line without a newline is still
/// returned.
pub fn read_lines_from<R: BufRead>(mut reader: R, max_line_bytes: usize) -> CleanerResult<Vec<LogLine>> {
    let mut lines = Vec::new();
    let mut buf = Vec::new();
    // Room for a full line plus "\r\n"
    let chunk_limit = max_line_bytes as u64 + 2;

    loop {
        let number = lines.len() + 1;
        buf.clear();

        let read = (&mut reader)
            .take(chunk_limit)
            .read_until(b'\n', &mut buf)
            .map_err(|e| CleanerError::Read(format!("Failed to read line {}: {}", number, e)))?;

        if read == 0 {
            break;
        }

        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }

        if buf.len() > max_line_bytes {
            return Err(CleanerError::LineTooLong {
                line: number,
                limit: max_line_bytes,
            });
        }

        let text = String::from_utf8(std::mem::take(&mut buf)).map_err(|e| {
            CleanerError::Read(format!("Line {} is not valid UTF-8: {}", number, e.utf8_error()))
        })?;

        lines.push(LogLine::new(number, text));
    }

    tracing::debug!(lines = lines.len(), "read source lines");
    Ok(lines)
}
