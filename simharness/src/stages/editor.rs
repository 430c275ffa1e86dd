//! Editor launch stage.

use super::{Stage, StageResult};
use crate::context::RunContext;
use crate::process::{CommandRunner, ProcessInvocation};
use crate::tools::Tool;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

/// Opens the project in the external editor.
///
/// Never fails the pipeline: any problem downgrades to Skipped with
/// guidance to open the project manually.
pub struct EditorStage {
    runner: Arc<dyn CommandRunner>,
}

impl EditorStage {
    /// Creates the stage with the given runner.
    #[must_use]
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl Stage for EditorStage {
    fn name(&self) -> &str {
        "editor"
    }

    fn optional(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: &RunContext) -> StageResult {
        let started = Utc::now();
        let invocation = ProcessInvocation::new(Tool::Editor.command(), ["."])
            .with_cwd(ctx.project_root());
        let outcome = self.runner.run(&invocation).await;

        if outcome.is_success() {
            StageResult::success(
                self.name(),
                "editor opened; start the simulation from the diagram view",
                started,
            )
        } else {
            StageResult::skipped(
                self.name(),
                format!(
                    "could not launch editor ({}); open the project directory manually",
                    outcome.status
                ),
                started,
            )
            .with_output(outcome)
        }
    }
}
