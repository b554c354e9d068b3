use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use logcleaner::cli::{handle_clean_command, handle_show_config, CleanArgs};
use logcleaner::config::{CleanerPaths, Settings};

#[derive(Parser)]
#[command(
    name = "logcleaner",
    author = "Kaylee Beyene",
    version,
    about = "Trim a log file in place, keeping only its most recent entries",
    long_about = "logcleaner keeps the last MAX_ROWS entries of a log file. Lines can be \
                  grouped into multi-line entries by a leading timestamp, filtered by \
                  content or minimum date, and the file is replaced atomically. A \
                  timestamped backup is taken first and restored if anything fails."
)]
struct Cli {
    #[command(flatten)]
    clean: CleanArgs,

    /// Settings file to use instead of the default config.json
    #[arg(long, value_name = "FILE", env = "LOGCLEANER_CONFIG")]
    config: Option<PathBuf>,

    /// Show current configuration and paths, then exit
    #[arg(long)]
    show_config: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Initialise the tracing subscriber on stderr
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "logcleaner=warn",
        1 => "logcleaner=info",
        _ => "logcleaner=debug",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // An explicit settings file does not need the default config directory
    let (paths, settings_file, settings) = match &cli.config {
        Some(file) => (CleanerPaths::new().ok(), file.clone(), Settings::load_from(file)?),
        None => {
            let paths = CleanerPaths::new()?;
            let settings = Settings::load_or_create(&paths)?;
            let file = paths.settings_file();
            (Some(paths), file, settings)
        }
    };

    if cli.show_config {
        handle_show_config(paths.as_ref(), &settings_file, &settings)?;
        return Ok(());
    }

    handle_clean_command(&cli.clean, &settings, cli.verbose > 0)?;
    Ok(())
}
