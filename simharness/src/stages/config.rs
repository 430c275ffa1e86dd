//! Configuration materialization stage.

use super::{Stage, StageResult};
use crate::context::RunContext;
use crate::manifest;
use async_trait::async_trait;
use chrono::Utc;
use tracing::error;

/// Writes the simulator manifest and circuit diagram under the project root.
///
/// Output is rendered from constants, so re-running this stage always yields
/// byte-identical documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigStage;

impl ConfigStage {
    /// Creates the stage.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Stage for ConfigStage {
    fn name(&self) -> &str {
        "config"
    }

    async fn execute(&self, ctx: &RunContext) -> StageResult {
        let started = Utc::now();
        match manifest::materialize(ctx).await {
            Ok((manifest_path, diagram_path)) => StageResult::success(
                self.name(),
                format!("wrote {manifest_path} and {diagram_path}"),
                started,
            ),
            Err(err) => {
                error!(%err, "configuration materialization failed");
                StageResult::failure(self.name(), err.to_string(), started)
            }
        }
    }
}
