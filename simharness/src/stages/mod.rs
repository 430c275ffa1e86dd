//! Pipeline stages.
//!
//! Stages are the discrete, independently reportable steps of the harness.
//! Each stage converts every error condition it meets into a
//! [`StageResult`]; no stage error ever escapes to the pipeline driver.

mod analyze;
mod build;
mod config;
mod demo;
mod editor;
mod prereq;
mod result;
mod setup;

pub use analyze::AnalysisStage;
pub use build::BuildStage;
pub use config::ConfigStage;
pub use demo::{DemoStage, DEMO_TIMEOUT};
pub use editor::EditorStage;
pub use prereq::{PrereqReport, PrereqStage};
pub use result::{StageOutcome, StageResult};
pub use setup::SetupStage;

use crate::context::RunContext;
use async_trait::async_trait;

/// Trait for harness stages.
#[async_trait]
pub trait Stage: Send + Sync {
    /// Returns the name of the stage.
    fn name(&self) -> &str;

    /// Returns true if the stage is optional: its failure degrades the run
    /// report but never flips the overall pipeline status.
    fn optional(&self) -> bool {
        false
    }

    /// Executes the stage against the shared run context.
    async fn execute(&self, ctx: &RunContext) -> StageResult;
}
