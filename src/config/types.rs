use std::path::Path;

use super::{env, toml};
use crate::log::DEFAULT_MAX_LINES;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "gpush.toml";

/// gpush configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path to the session log file (logging is off when unset).
    pub log_file: Option<String>,
    /// Log lines kept before the file is rotated.
    pub log_max_lines: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: None,
            log_max_lines: DEFAULT_MAX_LINES,
        }
    }
}

impl Config {
    /// Load configuration from all sources with proper precedence.
    ///
    /// Precedence: env vars > gpush.toml > defaults. A config file that
    /// cannot be read or parsed is ignored.
    pub fn load() -> Self {
        let mut config = Self::default();

        if Path::new(CONFIG_FILE).exists() {
            if let Ok(file_config) = Self::load_from_file(CONFIG_FILE) {
                config.merge_from(&file_config);
            }
        }

        config.apply_env();
        config
    }

    /// Load configuration from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        toml::load_from_file(path)
    }

    /// Parse TOML content into configuration.
    pub(super) fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        toml::parse_toml(content)
    }

    /// Apply environment variables.
    fn apply_env(&mut self) {
        env::apply_env(self);
    }

    /// Merge values from another config (for file-based config).
    fn merge_from(&mut self, other: &Self) {
        self.log_file = other.log_file.clone();
        self.log_max_lines = other.log_max_lines;
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading config file.
    Io(String),
    /// Parse error in config file.
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "config I/O error: {}", msg),
            Self::Parse(msg) => write!(f, "config parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
