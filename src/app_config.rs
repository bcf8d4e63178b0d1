use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::sanitize;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Extension for per-chapter output files
    #[serde(default = "default_output_extension")]
    pub output_extension: String,

    /// Maximum sanitized filename length in characters
    #[serde(default = "default_filename_max_length")]
    pub filename_max_length: usize,

    /// Fallback name for chapters whose title sanitizes to nothing
    #[serde(default = "default_chapter_name")]
    pub default_chapter_name: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_output_extension() -> String {
    "mp3".to_string()
}

fn default_filename_max_length() -> usize {
    sanitize::MAX_FILENAME_LENGTH
}

fn default_chapter_name() -> String {
    sanitize::DEFAULT_NAME.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            output_extension: default_output_extension(),
            filename_max_length: default_filename_max_length(),
            default_chapter_name: default_chapter_name(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.output_extension.trim().is_empty() {
            return Err(anyhow!("Output extension must not be empty"));
        }

        if self.output_extension.contains('.') {
            return Err(anyhow!(
                "Output extension must not contain a dot: '{}'",
                self.output_extension
            ));
        }

        if self.filename_max_length == 0 {
            return Err(anyhow!("Filename max length must be greater than zero"));
        }

        if self.default_chapter_name.trim().is_empty() {
            return Err(anyhow!("Default chapter name must not be empty"));
        }

        Ok(())
    }
}
