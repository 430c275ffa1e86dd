//! Run report aggregation and rendering.

use crate::stages::{StageOutcome, StageResult};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use uuid::Uuid;

/// Aggregated outcomes of one harness run.
///
/// The orchestrator is the sole writer; stages never touch each other's
/// results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique id of this run.
    pub run_id: Uuid,
    /// Per-stage results in execution order.
    pub results: Vec<StageResult>,
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}

impl RunReport {
    /// Creates an empty report with a fresh run id.
    #[must_use]
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            results: Vec::new(),
        }
    }

    /// Appends a stage result.
    pub fn push(&mut self, result: StageResult) {
        self.results.push(result);
    }

    /// Overall run status: Success iff no non-advisory stage failed.
    #[must_use]
    pub fn overall(&self) -> StageOutcome {
        if self.results.iter().any(StageResult::is_blocking_failure) {
            StageOutcome::Failure
        } else {
            StageOutcome::Success
        }
    }

    /// Returns true if the overall status is Success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.overall() == StageOutcome::Success
    }

    /// Renders the summary table plus captured stderr of failed stages.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "run {}", self.run_id);
        let _ = writeln!(out, "{:<15} {:<8} detail", "stage", "outcome");
        for result in &self.results {
            let first_line = result.detail.lines().next().unwrap_or("");
            let _ = writeln!(out, "{:<15} {:<8} {}", result.stage, result.outcome, first_line);
            for line in result.detail.lines().skip(1) {
                let _ = writeln!(out, "{:<24} {}", "", line);
            }
        }
        for result in &self.results {
            if let Some(ref output) = result.output {
                if result.is_failure() && !output.stderr.is_empty() {
                    let _ = writeln!(out, "--- {} stderr ---", result.stage);
                    let _ = writeln!(out, "{}", output.stderr.trim_end());
                }
            }
        }
        let _ = writeln!(out, "overall: {}", self.overall());
        out
    }
}
