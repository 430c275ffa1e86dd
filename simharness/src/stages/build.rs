//! Firmware compilation stage.

use super::{Stage, StageResult};
use crate::context::RunContext;
use crate::process::{CommandRunner, ProcessInvocation};
use crate::tools::{probe_tool, Tool};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

const FQBN: &str = "esp32:esp32:esp32s3";

/// Compiles the firmware sketch with `arduino-cli`.
///
/// The toolchain is optional: when it is unavailable the stage reports
/// Skipped, never Failure. The stage probes availability itself so that
/// direct dispatch works without a prior prerequisite check.
pub struct BuildStage {
    runner: Arc<dyn CommandRunner>,
}

impl BuildStage {
    /// Creates the stage with the given runner.
    #[must_use]
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl Stage for BuildStage {
    fn name(&self) -> &str {
        "compile"
    }

    fn optional(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: &RunContext) -> StageResult {
        let started = Utc::now();

        let availability = probe_tool(self.runner.as_ref(), Tool::ArduinoCli).await;
        if !availability.is_available() {
            return StageResult::skipped(
                self.name(),
                "arduino-cli unavailable; compile the firmware from the simulator extension instead",
                started,
            );
        }

        let output_dir = ctx.addon_dir().display().to_string();
        let sketch = ctx.sketch_path().display().to_string();
        let invocation = ProcessInvocation::new(
            Tool::ArduinoCli.command(),
            [
                "compile",
                "--fqbn",
                FQBN,
                "--output-dir",
                output_dir.as_str(),
                sketch.as_str(),
            ],
        );
        info!(command = %invocation.command_line(), "compiling firmware");
        let outcome = self.runner.run(&invocation).await;

        if !outcome.is_success() {
            return StageResult::failure(
                self.name(),
                format!("firmware compilation failed ({})", outcome.status),
                started,
            )
            .with_output(outcome);
        }

        let elf_present = ctx.firmware_elf().exists();
        let bin_present = ctx.firmware_bin().exists();
        if !(elf_present && bin_present) {
            return StageResult::failure(
                self.name(),
                format!(
                    "compiler exited cleanly but artifacts not produced: {} {}",
                    ctx.firmware_elf().display(),
                    ctx.firmware_bin().display()
                ),
                started,
            )
            .with_output(outcome);
        }

        StageResult::success(
            self.name(),
            format!(
                "firmware compiled: {} and {}",
                ctx.firmware_elf().display(),
                ctx.firmware_bin().display()
            ),
            started,
        )
        .with_output(outcome)
    }
}
