//! Clean command
//!
//! Turns the parsed command line plus user settings into `CleanOptions`,
//! runs the engine and prints its progress.

use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::display::{describe_event, paint, Tone};
use crate::error::{CleanerError, CleanerResult};
use crate::models::CleanOptions;
use crate::services::{CleanEvent, LogCleaner, StatusReporter};

/// Arguments of a cleaning run
#[derive(Args, Debug, Clone, Default)]
pub struct CleanArgs {
    /// Log file to clean in place
    #[arg(required_unless_present = "show_config")]
    pub path: Option<PathBuf>,

    /// Number of most recent entries to keep
    #[arg(
        value_parser = parse_max_rows,
        allow_negative_numbers = true,
        required_unless_present = "show_config"
    )]
    pub max_rows: Option<usize>,

    /// Timestamp layout that starts each entry (strftime, Go reference time,
    /// or tokens like YYYY-MM-DD HH:MM:SS)
    #[arg(short, long = "format", value_name = "LAYOUT")]
    pub format: Option<String>,

    /// Drop entries stamped before this date (written in the same layout)
    #[arg(short, long, value_name = "MIN_DATE")]
    pub since: Option<String>,

    /// Drop entries containing this text (repeatable)
    #[arg(short, long, value_name = "STUB")]
    pub exclude: Vec<String>,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl CleanArgs {
    /// Merge these arguments over the user's settings
    ///
    /// Flags win over settings; exclusion stubs from both are combined.
    pub fn to_options(&self, settings: &Settings) -> CleanerResult<CleanOptions> {
        let path = self
            .path
            .clone()
            .ok_or_else(|| CleanerError::Validation("a log file path is required".into()))?;
        let max_rows = self
            .max_rows
            .ok_or_else(|| CleanerError::Validation("max rows must be a positive number".into()))?;

        let date_format = self
            .format
            .clone()
            .unwrap_or_else(|| settings.date_format.clone());

        let mut options = CleanOptions::new(path, max_rows)
            .with_date_format(date_format)
            .with_exclude(settings.exclude.iter().chain(self.exclude.iter()))
            .with_max_line_bytes(settings.max_line_bytes);

        if let Some(since) = &self.since {
            options = options.with_min_date(since.clone());
        }

        Ok(options)
    }

    /// Whether status lines should be colored
    pub fn use_color(&self, settings: &Settings) -> bool {
        settings.color && !self.no_color && !self.json
    }
}

/// Parse the row limit, rejecting zero and negative values
fn parse_max_rows(value: &str) -> Result<usize, String> {
    let rows: i64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' must be a number", value))?;

    if rows <= 0 {
        return Err(format!("'{}' must be a positive number", value));
    }

    usize::try_from(rows).map_err(|_| format!("'{}' is too large", value))
}

/// Prints engine events to the terminal
#[derive(Debug, Clone, Copy)]
pub struct TerminalReporter {
    color: bool,
    verbose: bool,
    json: bool,
}

impl TerminalReporter {
    pub fn new(color: bool, verbose: bool, json: bool) -> Self {
        Self {
            color,
            verbose,
            json,
        }
    }

    /// Decide where an event goes, if anywhere
    fn route(&self, event: &CleanEvent, tone: Tone) -> Option<Stream> {
        if tone == Tone::Detail && !self.verbose {
            return None;
        }
        if self.json {
            // stdout carries the JSON report only
            return match event {
                CleanEvent::Completed(_) => None,
                _ => Some(Stream::Stderr),
            };
        }
        if tone.is_problem() {
            Some(Stream::Stderr)
        } else {
            Some(Stream::Stdout)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

impl StatusReporter for TerminalReporter {
    fn report(&mut self, event: &CleanEvent) {
        let (tone, text) = describe_event(event);
        let Some(stream) = self.route(event, tone) else {
            return;
        };

        let line = paint(text, tone, self.color);
        match stream {
            Stream::Stdout => println!("{}", line),
            Stream::Stderr => eprintln!("{}", line),
        }
    }
}

/// Handle a cleaning run
pub fn handle_clean_command(
    args: &CleanArgs,
    settings: &Settings,
    verbose: bool,
) -> CleanerResult<()> {
    let options = args.to_options(settings)?;
    let mut reporter = TerminalReporter::new(args.use_color(settings), verbose, args.json);

    let report = LogCleaner::new().clean(options, &mut reporter)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::RollbackOutcome;

    fn args(path: &str, max_rows: usize) -> CleanArgs {
        CleanArgs {
            path: Some(PathBuf::from(path)),
            max_rows: Some(max_rows),
            ..CleanArgs::default()
        }
    }

    #[test]
    fn test_parse_max_rows() {
        assert_eq!(parse_max_rows("10"), Ok(10));
        assert_eq!(parse_max_rows(" 3 "), Ok(3));
        assert!(parse_max_rows("0").unwrap_err().contains("must be a positive number"));
        assert!(parse_max_rows("-4").unwrap_err().contains("must be a positive number"));
        assert!(parse_max_rows("ten").unwrap_err().contains("must be a number"));
    }

    #[test]
    fn test_flags_override_settings() {
        let settings = Settings {
            date_format: "%Y-%m-%d".into(),
            exclude: vec!["healthcheck".into()],
            ..Settings::default()
        };
        let mut cli = args("app.log", 5);
        cli.format = Some("2006-01-02 15:04:05".into());
        cli.exclude = vec!["DEBUG".into()];
        cli.since = Some("2024-01-01 00:00:00".into());

        let options = cli.to_options(&settings).unwrap();
        assert_eq!(options.date_format, "2006-01-02 15:04:05");
        assert_eq!(options.exclude, vec!["healthcheck".to_string(), "DEBUG".to_string()]);
        assert_eq!(options.min_date.as_deref(), Some("2024-01-01 00:00:00"));
        assert_eq!(options.max_rows, 5);
    }

    #[test]
    fn test_settings_fill_missing_flags() {
        let settings = Settings {
            date_format: "%Y-%m-%d".into(),
            max_line_bytes: 2 * 1024 * 1024,
            ..Settings::default()
        };

        let options = args("app.log", 1).to_options(&settings).unwrap();
        assert_eq!(options.date_format, "%Y-%m-%d");
        assert_eq!(options.max_line_bytes, 2 * 1024 * 1024);
        assert!(options.min_date.is_none());
    }

    #[test]
    fn test_missing_path_is_validation_error() {
        let cli = CleanArgs {
            max_rows: Some(1),
            ..CleanArgs::default()
        };
        let err = cli.to_options(&Settings::default()).unwrap_err();
        assert!(matches!(err, CleanerError::Validation(_)));
    }

    #[test]
    fn test_color_toggles() {
        let settings = Settings::default();
        let mut cli = args("app.log", 1);
        assert!(cli.use_color(&settings));

        cli.no_color = true;
        assert!(!cli.use_color(&settings));

        cli.no_color = false;
        cli.json = true;
        assert!(!cli.use_color(&settings));
    }

    #[test]
    fn test_reporter_routing() {
        let quiet = TerminalReporter::new(false, false, false);
        let grouped = CleanEvent::Grouped {
            lines: 3,
            entries: 2,
        };
        assert_eq!(quiet.route(&grouped, Tone::Detail), None);

        let verbose = TerminalReporter::new(false, true, false);
        assert_eq!(verbose.route(&grouped, Tone::Detail), Some(Stream::Stdout));

        let rollback = CleanEvent::RollbackFinished(RollbackOutcome::RestoreFailed {
            reason: "gone".into(),
        });
        assert_eq!(quiet.route(&rollback, Tone::Error), Some(Stream::Stderr));

        let json = TerminalReporter::new(false, false, true);
        let completed = CleanEvent::Completed(crate::services::CleanReport::empty(
            PathBuf::from("a.log"),
            PathBuf::from("a.log.bak"),
        ));
        assert_eq!(json.route(&completed, Tone::Success), None);
        assert_eq!(
            json.route(&CleanEvent::RollbackFinished(RollbackOutcome::Restored), Tone::Success),
            Some(Stream::Stderr)
        );
    }
}
