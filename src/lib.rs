//! gpush: commit and push from a small terminal form.
//!
//! Collects a commit message in a full-screen prompt, then runs
//! `git add -A`, `git commit -m <message>` and `git push` in order,
//! stopping at the first failure.
//!
//! ## Optional configuration
//!
//! `gpush.toml` in the working directory (or `GPUSH_*` env vars) can enable
//! a session log:
//! - `[log] file` - Path to the log file (`GPUSH_LOG_FILE`)
//! - `[log] max_lines` - Lines before rotation (`GPUSH_LOG_MAX_LINES`)

pub mod config;
pub mod git;
pub mod log;
pub mod shutdown;
#[doc(hidden)]
pub mod testutil;
pub mod tui;
