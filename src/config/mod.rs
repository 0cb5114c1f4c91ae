//! Configuration loading for gpush.
//!
//! Only ambient settings are configurable; the git sequence itself is fixed.
//! Precedence (highest to lowest): env vars > gpush.toml > defaults.

mod cli;
mod env;
mod toml;
mod types;

pub use cli::{parse_args, CliArgs};
pub use types::{Config, ConfigError, CONFIG_FILE};
