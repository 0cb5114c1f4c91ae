use std::io::{self, Stdout};

use crossterm::{
    cursor::Show,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use super::app::{Action, TuiApp};
use super::render::draw_ui;
use crate::git::{self, GitExecutor, SystemGit};
use crate::log::Logger;

/// Raw mode plus alternate screen, restored when dropped.
///
/// Dropping the session covers normal exit, cancel and errors propagated
/// with `?`. Panics are covered by [`install_panic_hook`].
pub struct TerminalSession {
    pub terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        match Self::setup() {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                restore_terminal();
                Err(e)
            }
        }
    }

    fn setup() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;
        Ok(terminal)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Leave raw mode and the alternate screen. Safe to call more than once.
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

/// Install a panic hook that restores terminal state before printing the panic.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        default_hook(info);
    }));
}

/// Run the TUI against the real terminal and the real git.
pub fn run_tui(logger: &Logger) -> io::Result<()> {
    let mut session = TerminalSession::enter()?;
    let mut git = SystemGit::new();
    run_loop(&mut session.terminal, event::read, &mut git, logger)
}

/// The render/dispatch loop.
///
/// Draws a frame, blocks on `next_event`, dispatches the key, and repeats
/// until the user cancels. A submission draws one "Processing..." frame and
/// then blocks on git.
pub fn run_loop<B, F, E>(
    terminal: &mut Terminal<B>,
    mut next_event: F,
    executor: &mut E,
    logger: &Logger,
) -> io::Result<()>
where
    B: Backend,
    F: FnMut() -> io::Result<Event>,
    E: GitExecutor,
{
    let mut app = TuiApp::new();
    let mut capacity = 0;

    loop {
        terminal.draw(|f| {
            capacity = draw_ui(f, &app);
        })?;

        // Resize and other events just trigger a redraw
        let Event::Key(key) = next_event()? else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }

        match app.handle_key(key.code, key.modifiers, capacity) {
            Action::None => {}
            Action::Quit => {
                logger.info("cancelled");
                break;
            }
            Action::Submit(message) => {
                app.begin_processing();
                terminal.draw(|f| {
                    capacity = draw_ui(f, &app);
                })?;
                let outcome = git::push_changes(executor, &message, logger);
                app.finish_submit(&outcome);
            }
        }
    }

    Ok(())
}
