//! Termination-signal handling.
//!
//! In raw mode Ctrl+C arrives as a key event, but SIGTERM or SIGHUP (for
//! example a closed terminal window) would otherwise kill the process with
//! the terminal still in raw mode and on the alternate screen.
//!
//! # Example
//!
//! ```ignore
//! use gpush::shutdown;
//!
//! // Register the handler before entering the TUI
//! shutdown::register_handler()?;
//! ```

use crate::tui;

/// Standard exit code for a process ended by a signal.
pub const SIGNAL_EXIT_CODE: i32 = 130;

/// Register the termination handler.
///
/// Should be called once at program startup. The handler restores the
/// terminal and exits with [`SIGNAL_EXIT_CODE`].
pub fn register_handler() -> Result<(), String> {
    ctrlc::set_handler(move || {
        tui::restore_terminal();
        eprintln!("\nInterrupted, terminal restored.");
        std::process::exit(SIGNAL_EXIT_CODE);
    })
    .map_err(|e| format!("failed to register signal handler: {}", e))
}
