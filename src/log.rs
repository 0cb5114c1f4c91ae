//! Session logging with rotation.
//!
//! The UI owns the terminal while it runs, so diagnostics go to an optional
//! log file instead of stdout. A logger without a path discards everything.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::config::Config;

/// Default maximum number of lines before rotation.
pub const DEFAULT_MAX_LINES: usize = 1000;

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Error => "ERROR",
        }
    }
}

/// File logger for one gpush session.
#[derive(Debug, Clone)]
pub struct Logger {
    /// Path to the log file, `None` when logging is off.
    pub path: Option<PathBuf>,
    /// Maximum lines before rotation.
    pub max_lines: usize,
}

impl Logger {
    /// Create a logger writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            max_lines: DEFAULT_MAX_LINES,
        }
    }

    /// A logger that discards every entry.
    pub fn disabled() -> Self {
        Self {
            path: None,
            max_lines: DEFAULT_MAX_LINES,
        }
    }

    /// Build a logger from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        match config.log_file {
            Some(ref path) if !path.trim().is_empty() => {
                Self::new(path.trim()).with_max_lines(config.log_max_lines)
            }
            _ => Self::disabled(),
        }
    }

    /// Create a logger with a custom max lines setting.
    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.path.is_some()
    }

    /// Write a log entry.
    ///
    /// Format: `YYYY-MM-DD HH:MM:SS | LEVEL | <message>`
    pub fn log(&self, level: Level, message: &str) -> io::Result<()> {
        let Some(ref path) = self.path else {
            return Ok(());
        };
        ensure_parent_dir(path)?;

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let line = format!("{} | {} | {}\n", timestamp, level.as_str(), message);

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(line.as_bytes())?;
        file.flush()?;

        self.rotate_if_needed(path)
    }

    /// Log at info level, ignoring write failures.
    pub fn info(&self, message: &str) {
        let _ = self.log(Level::Info, message);
    }

    /// Log at error level, ignoring write failures.
    pub fn error(&self, message: &str) {
        let _ = self.log(Level::Error, message);
    }

    /// Write a separator for a new session.
    pub fn log_session_start(&self) -> io::Result<()> {
        let Some(ref path) = self.path else {
            return Ok(());
        };
        ensure_parent_dir(path)?;

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let separator = format!(
            "\n======================================================================\n\
             === gpush session started at {} ===\n\
             ======================================================================\n\n",
            timestamp
        );

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(separator.as_bytes())?;
        file.flush()
    }

    fn rotate_if_needed(&self, path: &Path) -> io::Result<()> {
        if !path.exists() {
            return Ok(());
        }
        if count_lines(path)? <= self.max_lines {
            return Ok(());
        }
        rotate_log(path)
    }

    /// Read all lines from the log file.
    pub fn read_all(&self) -> io::Result<Vec<String>> {
        match self.path {
            Some(ref path) if path.exists() => {
                let reader = BufReader::new(File::open(path)?);
                reader.lines().collect()
            }
            _ => Ok(Vec::new()),
        }
    }
}

fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Count lines in a file.
pub fn count_lines(path: &Path) -> io::Result<usize> {
    let reader = BufReader::new(File::open(path)?);
    Ok(reader.lines().count())
}

/// Rotate a log file.
///
/// Moves the file to a timestamped `.bak` next to it and starts an empty one.
pub fn rotate_log(path: &Path) -> io::Result<()> {
    if !path.exists() {
        return Ok(());
    }

    let timestamp = Local::now().format("%Y%m%d-%H%M%S");
    let backup_name = format!(
        "{}.{}.bak",
        path.file_name().and_then(|n| n.to_str()).unwrap_or("gpush.log"),
        timestamp
    );
    let backup_path = path.with_file_name(backup_name);

    fs::rename(path, &backup_path)?;
    File::create(path)?;
    Ok(())
}
