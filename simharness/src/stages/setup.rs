//! Firmware toolchain environment setup stage.
//!
//! Installs the board package and sketch libraries the firmware needs.
//! Reachable through direct dispatch only; the full pipeline does not run it.

use super::{Stage, StageResult};
use crate::context::RunContext;
use crate::process::{CommandRunner, ProcessInvocation};
use crate::tools::{probe_tool, Tool};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

const INSTALL_STEPS: [&[&str]; 4] = [
    &["core", "update-index"],
    &["core", "install", "esp32:esp32"],
    &["lib", "install", "ArduinoJson"],
    &["lib", "install", "WiFi"],
];

/// Best-effort `arduino-cli` board and library installation.
pub struct SetupStage {
    runner: Arc<dyn CommandRunner>,
}

impl SetupStage {
    /// Creates the stage with the given runner.
    #[must_use]
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl Stage for SetupStage {
    fn name(&self) -> &str {
        "setup"
    }

    fn optional(&self) -> bool {
        true
    }

    async fn execute(&self, _ctx: &RunContext) -> StageResult {
        let started = Utc::now();

        let availability = probe_tool(self.runner.as_ref(), Tool::ArduinoCli).await;
        if !availability.is_available() {
            return StageResult::skipped(
                self.name(),
                "arduino-cli unavailable; toolchain setup not applicable",
                started,
            );
        }

        let mut failed = Vec::new();
        for step in INSTALL_STEPS {
            let invocation =
                ProcessInvocation::new(Tool::ArduinoCli.command(), step.iter().copied());
            info!(command = %invocation.command_line(), "running setup step");
            let outcome = self.runner.run(&invocation).await;
            if outcome.is_success() {
                continue;
            }
            warn!(
                command = %invocation.command_line(),
                status = %outcome.status,
                "setup step failed"
            );
            failed.push(invocation.command_line());
        }

        // Installs are best-effort: a failed step is recorded, not fatal.
        let detail = if failed.is_empty() {
            "board package and libraries installed".to_string()
        } else {
            format!("completed with failed step(s): {}", failed.join(", "))
        };
        StageResult::success(self.name(), detail, started)
    }
}
