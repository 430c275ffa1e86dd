//! Description of a single external command invocation.

use std::path::PathBuf;
use std::time::Duration;

/// One external command invocation: command, arguments, optional working
/// directory and optional timeout.
///
/// Invocations are transient: built per call, consumed by a
/// [`super::CommandRunner`], never retained after the call returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInvocation {
    /// The command to execute.
    pub command: String,
    /// Arguments passed to the command.
    pub args: Vec<String>,
    /// Working directory, or the harness process cwd if `None`.
    pub cwd: Option<PathBuf>,
    /// Wall-clock limit for the call, or unbounded if `None`.
    pub timeout: Option<Duration>,
}

impl ProcessInvocation {
    /// Creates an invocation with no working directory and no timeout.
    #[must_use]
    pub fn new<I, S>(command: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
            timeout: None,
        }
    }

    /// Sets the working directory.
    #[must_use]
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Renders the invocation as a single command line for logs and
    /// scripted-runner matching.
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut line = self.command.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_rendering() {
        let inv = ProcessInvocation::new("arduino-cli", ["core", "update-index"]);
        assert_eq!(inv.command_line(), "arduino-cli core update-index");
    }

    #[test]
    fn test_command_line_no_args() {
        let inv = ProcessInvocation::new("cargo", Vec::<String>::new());
        assert_eq!(inv.command_line(), "cargo");
    }

    #[test]
    fn test_builder_setters() {
        let inv = ProcessInvocation::new("code", ["."])
            .with_cwd("/srv/project")
            .with_timeout(Duration::from_secs(30));
        assert_eq!(inv.cwd.as_deref(), Some(std::path::Path::new("/srv/project")));
        assert_eq!(inv.timeout, Some(Duration::from_secs(30)));
    }
}
