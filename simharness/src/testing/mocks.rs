//! Scripted command runner for tests.

use crate::process::{CommandRunner, ProcessInvocation, ProcessOutcome};
use async_trait::async_trait;
use parking_lot::Mutex;

/// A [`CommandRunner`] double that answers invocations from a script and
/// records every call.
///
/// Responses are matched by command-line prefix in registration order;
/// register more specific prefixes first. Unmatched invocations report the
/// command as not found, which conveniently models an empty PATH.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: Mutex<Vec<(String, ProcessOutcome)>>,
    calls: Mutex<Vec<ProcessInvocation>>,
}

impl ScriptedRunner {
    /// Creates a runner with no scripted responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an outcome for invocations whose command line starts with
    /// the given prefix.
    pub fn respond(&self, prefix: impl Into<String>, outcome: ProcessOutcome) {
        self.responses.lock().push((prefix.into(), outcome));
    }

    /// Registers a zero-exit response with the given stdout.
    pub fn respond_success(&self, prefix: impl Into<String>, stdout: impl Into<String>) {
        self.respond(prefix, ProcessOutcome::exited(0, stdout, ""));
    }

    /// Registers a response with an explicit exit code and output.
    pub fn respond_exit(
        &self,
        prefix: impl Into<String>,
        code: i32,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) {
        self.respond(prefix, ProcessOutcome::exited(code, stdout, stderr));
    }

    /// Registers a timeout response.
    pub fn respond_timeout(&self, prefix: impl Into<String>) {
        self.respond(prefix, ProcessOutcome::timed_out());
    }

    /// Returns all recorded invocations.
    #[must_use]
    pub fn calls(&self) -> Vec<ProcessInvocation> {
        self.calls.lock().clone()
    }

    /// Returns the recorded invocations as rendered command lines.
    #[must_use]
    pub fn call_lines(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .map(ProcessInvocation::command_line)
            .collect()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, invocation: &ProcessInvocation) -> ProcessOutcome {
        self.calls.lock().push(invocation.clone());
        let line = invocation.command_line();
        let responses = self.responses.lock();
        responses
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map_or_else(ProcessOutcome::not_found, |(_, outcome)| outcome.clone())
    }
}
