//! Non-raising process execution on top of `tokio::process`.

use super::ProcessInvocation;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// How an external process invocation ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum ProcessStatus {
    /// The process ran to completion with the given exit code.
    Exited(i32),
    /// The process was terminated by a signal before producing an exit code.
    Signaled,
    /// The process exceeded its timeout and was killed.
    TimedOut,
    /// The command was not found on the system.
    NotFound,
    /// The process could not be spawned for another reason.
    SpawnFailed(String),
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exited(code) => write!(f, "exited with code {code}"),
            Self::Signaled => write!(f, "terminated by signal"),
            Self::TimedOut => write!(f, "timed out"),
            Self::NotFound => write!(f, "command not found"),
            Self::SpawnFailed(reason) => write!(f, "spawn failed: {reason}"),
        }
    }
}

/// The structured result of one external process invocation.
///
/// A runner never raises: nonzero exits, missing commands and timeouts are
/// all reported through this type so callers can treat them as data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOutcome {
    /// How the invocation ended.
    pub status: ProcessStatus,
    /// Captured standard output. Empty when the process timed out.
    pub stdout: String,
    /// Captured standard error. Empty when the process timed out.
    pub stderr: String,
}

impl ProcessOutcome {
    /// Creates an outcome for a completed process.
    #[must_use]
    pub fn exited(code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            status: ProcessStatus::Exited(code),
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Creates an outcome for a successful (exit 0) process with no output.
    #[must_use]
    pub fn success() -> Self {
        Self::exited(0, "", "")
    }

    /// Creates an outcome for a command that was not found.
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            status: ProcessStatus::NotFound,
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    /// Creates an outcome for a timed-out invocation.
    #[must_use]
    pub fn timed_out() -> Self {
        Self {
            status: ProcessStatus::TimedOut,
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    /// Returns true if the process exited with code zero.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.status, ProcessStatus::Exited(0))
    }

    /// Returns true if the invocation timed out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self.status, ProcessStatus::TimedOut)
    }

    /// Returns true if the command was not found.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self.status, ProcessStatus::NotFound)
    }

    /// First line of stdout, trimmed. Used for tool version probes.
    #[must_use]
    pub fn first_stdout_line(&self) -> &str {
        self.stdout.lines().next().unwrap_or("").trim()
    }
}

/// Trait stages invoke external processes through.
///
/// The production implementation is [`ProcessRunner`]; tests substitute a
/// scripted runner from [`crate::testing`].
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs the invocation to completion, its timeout, or a spawn failure.
    ///
    /// This method never fails; every error condition is folded into the
    /// returned [`ProcessOutcome`].
    async fn run(&self, invocation: &ProcessInvocation) -> ProcessOutcome;
}

/// Tokio-backed command runner.
///
/// Children are spawned with `kill_on_drop` so that a timed-out invocation
/// never leaves an orphaned process behind.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    /// Creates a new runner.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, invocation: &ProcessInvocation) -> ProcessOutcome {
        debug!(command = %invocation.command_line(), "spawning external process");

        let mut cmd = Command::new(&invocation.command);
        cmd.args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(ref cwd) = invocation.cwd {
            cmd.current_dir(cwd);
        }

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(command = %invocation.command, "command not found");
                return ProcessOutcome::not_found();
            }
            Err(err) => {
                return ProcessOutcome {
                    status: ProcessStatus::SpawnFailed(err.to_string()),
                    stdout: String::new(),
                    stderr: String::new(),
                };
            }
        };

        let wait = child.wait_with_output();
        let output = match invocation.timeout {
            Some(limit) => match tokio::time::timeout(limit, wait).await {
                Ok(result) => result,
                // Dropping the wait future drops the child, and kill_on_drop
                // reaps it.
                Err(_) => {
                    debug!(command = %invocation.command_line(), "invocation timed out");
                    return ProcessOutcome::timed_out();
                }
            },
            None => wait.await,
        };

        match output {
            Ok(output) => {
                let status = match output.status.code() {
                    Some(code) => ProcessStatus::Exited(code),
                    None => ProcessStatus::Signaled,
                };
                ProcessOutcome {
                    status,
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                }
            }
            Err(err) => ProcessOutcome {
                status: ProcessStatus::SpawnFailed(err.to_string()),
                stdout: String::new(),
                stderr: String::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_run_captures_stdout() {
        let runner = ProcessRunner::new();
        let outcome = runner
            .run(&ProcessInvocation::new("echo", ["hello"]))
            .await;
        assert!(outcome.is_success());
        assert_eq!(outcome.first_stdout_line(), "hello");
    }

    #[tokio::test]
    async fn test_run_nonzero_exit_is_data_not_error() {
        let runner = ProcessRunner::new();
        let outcome = runner
            .run(&ProcessInvocation::new("sh", ["-c", "echo oops >&2; exit 3"]))
            .await;
        assert_eq!(outcome.status, ProcessStatus::Exited(3));
        assert!(outcome.stderr.contains("oops"));
    }

    #[tokio::test]
    async fn test_run_missing_command_reports_not_found() {
        let runner = ProcessRunner::new();
        let outcome = runner
            .run(&ProcessInvocation::new(
                "definitely-not-a-real-command-7f3a",
                Vec::<String>::new(),
            ))
            .await;
        assert!(outcome.is_not_found());
    }

    #[tokio::test]
    async fn test_run_timeout_kills_child() {
        let runner = ProcessRunner::new();
        let outcome = runner
            .run(
                &ProcessInvocation::new("sleep", ["5"])
                    .with_timeout(Duration::from_millis(50)),
            )
            .await;
        assert!(outcome.is_timeout());
    }

    #[tokio::test]
    async fn test_run_honors_cwd() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ProcessRunner::new();
        let outcome = runner
            .run(&ProcessInvocation::new("pwd", Vec::<String>::new()).with_cwd(dir.path()))
            .await;
        assert!(outcome.is_success());
        let reported = std::path::PathBuf::from(outcome.first_stdout_line());
        let expected = dir.path().canonicalize().unwrap();
        assert_eq!(reported.canonicalize().unwrap(), expected);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ProcessStatus::Exited(1).to_string(), "exited with code 1");
        assert_eq!(ProcessStatus::NotFound.to_string(), "command not found");
        assert_eq!(ProcessStatus::TimedOut.to_string(), "timed out");
    }
}
