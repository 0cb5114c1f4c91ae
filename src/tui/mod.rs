mod app;
mod render;
mod run;
mod wrap;

pub use app::{Action, Severity, Status, TuiApp, EMPTY_MESSAGE};
pub use run::{install_panic_hook, restore_terminal, run_loop, run_tui, TerminalSession};
