//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod clean;
pub mod config;

pub use clean::{handle_clean_command, CleanArgs, TerminalReporter};
pub use config::handle_show_config;
