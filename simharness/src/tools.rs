//! External tool identities, availability probing, and the per-tool
//! blocking/advisory policy table.

use crate::process::{CommandRunner, ProcessInvocation, ProcessStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// How hard the harness depends on a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    /// Absence halts the pipeline with a blocking issue.
    Mandatory,
    /// Absence degrades the dependent stage to Skipped.
    Optional,
    /// Absence is informational only.
    Advisory,
}

/// The external tools the harness drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// The editor used to open the project (`code`).
    Editor,
    /// The firmware build toolchain (`arduino-cli`).
    ArduinoCli,
    /// The native toolchain building and running the demo (`cargo`).
    Cargo,
}

impl Tool {
    /// The executable name for this tool.
    #[must_use]
    pub fn command(&self) -> &'static str {
        match self {
            Self::Editor => "code",
            Self::ArduinoCli => "arduino-cli",
            Self::Cargo => "cargo",
        }
    }

    /// Arguments that make the tool print its version and exit.
    #[must_use]
    pub fn probe_args(&self) -> &'static [&'static str] {
        match self {
            Self::Editor | Self::Cargo => &["--version"],
            Self::ArduinoCli => &["version"],
        }
    }

    /// The skip/fail policy for this tool.
    #[must_use]
    pub fn requirement(&self) -> Requirement {
        match self {
            Self::Editor => Requirement::Advisory,
            Self::ArduinoCli => Requirement::Optional,
            Self::Cargo => Requirement::Mandatory,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

/// Availability of one external tool, computed fresh each run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "version")]
pub enum ToolAvailability {
    /// The tool responded to a version probe.
    Available(String),
    /// The tool is not installed (command not found).
    Missing,
    /// The probe spawned but did not confirm the tool (nonzero exit,
    /// signal, or spawn failure); the tool may still be installed.
    Unknown,
}

impl ToolAvailability {
    /// Returns true if the tool answered its version probe.
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// Returns true if the command was not found at all.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// Probes a tool by asking it for its version.
pub async fn probe_tool(runner: &dyn CommandRunner, tool: Tool) -> ToolAvailability {
    let invocation = ProcessInvocation::new(tool.command(), tool.probe_args().iter().copied());
    let outcome = runner.run(&invocation).await;
    let availability = match outcome.status {
        ProcessStatus::Exited(0) => {
            ToolAvailability::Available(outcome.first_stdout_line().to_string())
        }
        ProcessStatus::NotFound => ToolAvailability::Missing,
        _ => ToolAvailability::Unknown,
    };
    debug!(tool = %tool, availability = ?availability, "tool probe");
    availability
}
