//! Configuration module for logcleaner
//!
//! This module provides configuration management including:
//! - Config directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::CleanerPaths;
pub use settings::Settings;
