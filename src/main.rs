use std::env;
use std::process;

use gpush::config::{self, Config};
use gpush::log::Logger;
use gpush::shutdown;
use gpush::tui;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    let args: Vec<String> = env::args().collect();
    let cli = config::parse_args(args);

    if cli.help {
        print_help();
        return;
    }

    if cli.version {
        println!("gpush {}", VERSION);
        return;
    }

    let config = Config::load();
    let logger = Logger::from_config(&config);

    if let Err(e) = run(&logger) {
        logger.error(&format!("fatal: {}", e));
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(logger: &Logger) -> Result<(), String> {
    shutdown::register_handler()?;
    tui::install_panic_hook();

    if let Err(e) = logger.log_session_start() {
        eprintln!("warning: cannot write log: {}", e);
    }

    tui::run_tui(logger).map_err(|e| format!("terminal error: {}", e))
}

fn print_help() {
    println!(
        r#"gpush - commit and push with a one-line message

USAGE:
    gpush [OPTIONS]

Opens a full-screen prompt for a commit message. On ENTER runs
`git add -A`, `git commit -m <message>` and `git push` in the current
directory, stopping at the first failure. ESC quits.

OPTIONS:
    -h, --help       Show this help message
    -V, --version    Show version

CONFIGURATION (gpush.toml or environment):
    [log] file       GPUSH_LOG_FILE       Session log file (off by default)
    [log] max_lines  GPUSH_LOG_MAX_LINES  Lines before the log is rotated
"#
    );
}
