//! Stage, commit and push.
//!
//! The three steps run strictly in order and the sequence stops at the first
//! failure. Nothing is rolled back: a failed commit leaves the staged changes
//! from `git add -A` in place.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{self, Stdio};

use crate::log::Logger;

/// Status text shown after all three steps succeed.
pub const SUCCESS_MESSAGE: &str = "Successfully pushed changes!";

/// One step of the push sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `git add -A`
    Stage,
    /// `git commit -m <message>`
    Commit,
    /// `git push`
    Publish,
}

impl Step {
    /// All steps in execution order.
    pub const ALL: [Step; 3] = [Step::Stage, Step::Commit, Step::Publish];

    /// Short name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stage => "stage",
            Self::Commit => "commit",
            Self::Publish => "publish",
        }
    }

    /// Command line shown to the user when the step fails (message omitted).
    pub fn command(&self) -> &'static str {
        match self {
            Self::Stage => "git add -A",
            Self::Commit => "git commit",
            Self::Publish => "git push",
        }
    }

    /// Arguments passed to git for this step.
    pub fn args<'a>(&self, message: &'a str) -> Vec<&'a str> {
        match self {
            Self::Stage => vec!["add", "-A"],
            Self::Commit => vec!["commit", "-m", message],
            Self::Publish => vec!["push"],
        }
    }
}

/// Captured result of one git invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was killed by a signal.
    pub code: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// A successful, silent invocation.
    pub fn ok() -> Self {
        Self {
            code: Some(0),
            success: true,
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    /// A failed invocation with the given exit code and stderr.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Diagnostic text for a failure, collapsed onto a single line.
    ///
    /// Prefers stderr; `git commit` reports "nothing to commit" on stdout.
    pub fn diagnostic(&self) -> String {
        let source = if self.stderr.trim().is_empty() {
            &self.stdout
        } else {
            &self.stderr
        };
        source.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl From<process::Output> for CommandOutput {
    fn from(output: process::Output) -> Self {
        Self {
            code: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Runs git with a list of arguments.
pub trait GitExecutor {
    fn run(&mut self, args: &[&str]) -> io::Result<CommandOutput>;
}

/// Executes the real `git` binary.
#[derive(Debug, Clone)]
pub struct SystemGit {
    program: String,
    dir: Option<PathBuf>,
}

impl SystemGit {
    /// Use `git` from `PATH` in the current working directory.
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
            dir: None,
        }
    }

    /// Use a specific git binary.
    pub fn with_path(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            dir: None,
        }
    }

    /// Run against the repository at `dir` instead of the working directory.
    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.dir = Some(dir.to_path_buf());
        self
    }
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new()
    }
}

impl GitExecutor for SystemGit {
    fn run(&mut self, args: &[&str]) -> io::Result<CommandOutput> {
        let mut cmd = process::Command::new(&self.program);
        if let Some(ref dir) = self.dir {
            cmd.arg("-C").arg(dir);
        }
        // The UI holds the terminal in raw mode, so a credential prompt
        // would be invisible and block forever.
        cmd.args(args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null());
        cmd.output().map(CommandOutput::from)
    }
}

/// Why a step failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitErrorKind {
    /// git ran and exited unsuccessfully.
    Exit {
        code: Option<i32>,
        diagnostic: String,
    },
    /// git could not be started.
    Spawn(String),
}

/// A failed step of the push sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitError {
    pub step: Step,
    pub kind: GitErrorKind,
}

impl fmt::Display for GitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let command = self.step.command();
        match &self.kind {
            GitErrorKind::Exit { code, diagnostic } => {
                match code {
                    Some(code) => write!(f, "Git command failed: {} (exit status {})", command, code)?,
                    None => write!(f, "Git command failed: {} (terminated by signal)", command)?,
                }
                if !diagnostic.is_empty() {
                    write!(f, ": {}", diagnostic)?;
                }
                Ok(())
            }
            GitErrorKind::Spawn(e) => write!(f, "Error: failed to run {}: {}", command, e),
        }
    }
}

impl std::error::Error for GitError {}

/// Result of a push attempt, as shown in the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    Success(String),
    Failure { step: Step, diagnostic: String },
}

impl PushOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Human-readable result text.
    pub fn message(&self) -> &str {
        match self {
            Self::Success(text) => text,
            Self::Failure { diagnostic, .. } => diagnostic,
        }
    }
}

impl From<GitError> for PushOutcome {
    fn from(err: GitError) -> Self {
        Self::Failure {
            step: err.step,
            diagnostic: err.to_string(),
        }
    }
}

/// Run a single step.
pub fn run_step<E: GitExecutor>(executor: &mut E, step: Step, message: &str) -> Result<(), GitError> {
    let output = executor.run(&step.args(message)).map_err(|e| GitError {
        step,
        kind: GitErrorKind::Spawn(e.to_string()),
    })?;

    if output.success {
        Ok(())
    } else {
        Err(GitError {
            step,
            kind: GitErrorKind::Exit {
                code: output.code,
                diagnostic: output.diagnostic(),
            },
        })
    }
}

/// Stage everything, commit with `message`, then push.
///
/// Stops at the first failing step. `message` is passed to git as a single
/// argument, never through a shell.
pub fn push_changes<E: GitExecutor>(executor: &mut E, message: &str, logger: &Logger) -> PushOutcome {
    logger.info(&format!("push started: {:?}", message));

    for step in Step::ALL {
        logger.info(&format!("running {}", step.command()));
        if let Err(err) = run_step(executor, step, message) {
            logger.error(&format!("{} failed: {}", step.as_str(), err));
            return err.into();
        }
    }

    logger.info("push complete");
    PushOutcome::Success(SUCCESS_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every invocation and fails the step whose first arg matches.
    struct RecordingGit {
        calls: Vec<Vec<String>>,
        fail_on: Option<(&'static str, CommandOutput)>,
        spawn_error: bool,
    }

    impl RecordingGit {
        fn new() -> Self {
            Self {
                calls: Vec::new(),
                fail_on: None,
                spawn_error: false,
            }
        }

        fn failing(subcommand: &'static str, output: CommandOutput) -> Self {
            Self {
                fail_on: Some((subcommand, output)),
                ..Self::new()
            }
        }
    }

    impl GitExecutor for RecordingGit {
        fn run(&mut self, args: &[&str]) -> io::Result<CommandOutput> {
            self.calls.push(args.iter().map(|s| s.to_string()).collect());
            if self.spawn_error {
                return Err(io::Error::new(io::ErrorKind::NotFound, "No such file or directory"));
            }
            match &self.fail_on {
                Some((sub, output)) if args.first() == Some(sub) => Ok(output.clone()),
                _ => Ok(CommandOutput::ok()),
            }
        }
    }

    fn calls(git: &RecordingGit) -> Vec<Vec<&str>> {
        git.calls
            .iter()
            .map(|c| c.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_push_runs_three_steps_in_order() {
        let mut git = RecordingGit::new();
        let outcome = push_changes(&mut git, "fix bug", &Logger::disabled());

        assert_eq!(outcome, PushOutcome::Success(SUCCESS_MESSAGE.to_string()));
        assert_eq!(
            calls(&git),
            vec![
                vec!["add", "-A"],
                vec!["commit", "-m", "fix bug"],
                vec!["push"],
            ]
        );
    }

    #[test]
    fn test_commit_failure_skips_push() {
        let mut git = RecordingGit::failing("commit", CommandOutput::failed(1, "error: bad\n"));
        let outcome = push_changes(&mut git, "fix bug", &Logger::disabled());

        assert!(!outcome.is_success());
        assert_eq!(git.calls.len(), 2);
        match outcome {
            PushOutcome::Failure { step, diagnostic } => {
                assert_eq!(step, Step::Commit);
                assert_eq!(
                    diagnostic,
                    "Git command failed: git commit (exit status 1): error: bad"
                );
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_stage_failure_stops_immediately() {
        let mut git = RecordingGit::failing("add", CommandOutput::failed(128, "fatal: not a git repository"));
        let outcome = push_changes(&mut git, "msg", &Logger::disabled());

        assert_eq!(git.calls.len(), 1);
        assert!(matches!(outcome, PushOutcome::Failure { step: Step::Stage, .. }));
        assert!(outcome.message().contains("fatal: not a git repository"));
        assert!(outcome.message().contains("exit status 128"));
    }

    #[test]
    fn test_publish_failure_reports_push() {
        let mut git = RecordingGit::failing("push", CommandOutput::failed(1, "fatal: No configured push destination."));
        let outcome = push_changes(&mut git, "msg", &Logger::disabled());

        assert_eq!(git.calls.len(), 3);
        assert!(matches!(outcome, PushOutcome::Failure { step: Step::Publish, .. }));
        assert!(outcome.message().starts_with("Git command failed: git push"));
    }

    #[test]
    fn test_spawn_error_reported() {
        let mut git = RecordingGit::new();
        git.spawn_error = true;
        let outcome = push_changes(&mut git, "msg", &Logger::disabled());

        assert_eq!(git.calls.len(), 1);
        assert!(outcome.message().starts_with("Error: failed to run git add -A"));
    }

    #[test]
    fn test_diagnostic_falls_back_to_stdout() {
        let output = CommandOutput {
            code: Some(1),
            success: false,
            stdout: "On branch main\nnothing to commit, working tree clean\n".to_string(),
            stderr: String::new(),
        };
        assert_eq!(
            output.diagnostic(),
            "On branch main nothing to commit, working tree clean"
        );
    }

    #[test]
    fn test_error_display_without_diagnostic() {
        let err = GitError {
            step: Step::Publish,
            kind: GitErrorKind::Exit {
                code: None,
                diagnostic: String::new(),
            },
        };
        assert_eq!(err.to_string(), "Git command failed: git push (terminated by signal)");
    }

    #[test]
    fn test_message_passed_as_single_argument() {
        let mut git = RecordingGit::new();
        push_changes(&mut git, "quote \"and\" $HOME; rm -rf", &Logger::disabled());
        assert_eq!(git.calls[1], vec!["commit", "-m", "quote \"and\" $HOME; rm -rf"]);
    }
}
