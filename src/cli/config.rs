//! Show-config command
//!
//! Prints where settings come from and the values in effect.

use std::io::{self, Write};
use std::path::Path;

use crate::config::{CleanerPaths, Settings};
use crate::error::CleanerResult;

/// Render the resolved configuration
///
/// `paths` is `None` when an explicit settings file was given and no default
/// config directory could be determined.
pub fn render_config(
    paths: Option<&CleanerPaths>,
    settings_file: &Path,
    settings: &Settings,
) -> String {
    let mut out = String::new();
    out.push_str("logcleaner Configuration\n");
    out.push_str("========================\n");
    match paths {
        Some(paths) => {
            out.push_str(&format!("Config directory: {}\n", paths.base_dir().display()))
        }
        None => out.push_str("Config directory: (unavailable)\n"),
    }
    let state = if settings_file.exists() { "" } else { " (not found, using defaults)" };
    out.push_str(&format!("Settings file:    {}{}\n", settings_file.display(), state));
    out.push('\n');
    out.push_str("Settings:\n");

    let date_format = if settings.date_format.is_empty() {
        "(none, one line per entry)"
    } else {
        settings.date_format.as_str()
    };
    out.push_str(&format!("  Date format:    {}\n", date_format));
    out.push_str(&format!("  Max line bytes: {}\n", settings.max_line_bytes));
    if settings.exclude.is_empty() {
        out.push_str("  Exclude:        (none)\n");
    } else {
        out.push_str(&format!("  Exclude:        {}\n", settings.exclude.join(", ")));
    }
    out.push_str(&format!("  Color:          {}\n", settings.color));
    out
}

/// Handle `--show-config`
pub fn handle_show_config(
    paths: Option<&CleanerPaths>,
    settings_file: &Path,
    settings: &Settings,
) -> CleanerResult<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(render_config(paths, settings_file, settings).as_bytes())?;
    stdout.flush()?;
    Ok(())
}
