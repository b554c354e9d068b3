//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt the target on failure.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{CleanerError, CleanerResult};
use crate::models::Entry;

/// Serializes entries into the output file
pub trait EntryWriter {
    fn write_entries(&self, out: &mut dyn Write, entries: &[Entry]) -> io::Result<()>;
}

/// Writes each entry as one line terminated by `\n`
#[derive(Debug, Default, Clone, Copy)]
pub struct LineWriter;

impl EntryWriter for LineWriter {
    fn write_entries(&self, out: &mut dyn Write, entries: &[Entry]) -> io::Result<()> {
        for entry in entries {
            out.write_all(entry.text().as_bytes())?;
            out.write_all(b"\n")?;
        }
        Ok(())
    }
}

/// Replace `path` with the given entries atomically (write to temp, then rename)
///
/// The temporary file lives in the same directory as the target so the final
/// rename never crosses filesystems. It takes over the target's permissions
/// and is removed on every failure path. Failures before the rename are
/// `Write` errors, the rename itself is a `Commit` error.
pub fn replace_atomic(path: &Path, entries: &[Entry], writer: &dyn EntryWriter) -> CleanerResult<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "log".to_string());

    let mut temp = tempfile::Builder::new()
        .prefix(&format!("{}.", file_name))
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| CleanerError::Write(format!("Failed to create temp file: {}", e)))?;

    {
        let mut out = BufWriter::new(temp.as_file_mut());
        writer
            .write_entries(&mut out, entries)
            .map_err(|e| CleanerError::Write(format!("Failed to write temp file: {}", e)))?;
        out.flush()
            .map_err(|e| CleanerError::Write(format!("Failed to flush data: {}", e)))?;
    }

    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(temp.path(), metadata.permissions())
            .map_err(|e| CleanerError::Write(format!("Failed to copy permissions: {}", e)))?;
    }

    // Sync to disk before rename
    temp.as_file()
        .sync_all()
        .map_err(|e| CleanerError::Write(format!("Failed to sync data: {}", e)))?;

    // Atomic rename; a failed persist drops (and deletes) the temp file
    temp.persist(path).map_err(|e| {
        CleanerError::Commit(format!(
            "Failed to rename temp file over {}: {}",
            path.display(),
            e.error
        ))
    })?;

    Ok(())
}

/// Make sure an (empty) file exists at `path` without touching existing content
pub fn ensure_file_exists(path: &Path) -> CleanerResult<()> {
    if !path.exists() {
        File::create(path).map_err(|e| {
            CleanerError::Write(format!("Failed to recreate {}: {}", path.display(), e))
        })?;
    }
    Ok(())
}
