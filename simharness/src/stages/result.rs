//! Structured per-stage outcome records.

use crate::process::ProcessOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The outcome of one stage invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageOutcome {
    /// Stage completed successfully.
    Success,
    /// Stage failed.
    Failure,
    /// Stage did not apply and was skipped.
    Skipped,
}

impl fmt::Display for StageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

/// The structured result every stage produces exactly once per invocation.
///
/// Results are immutable once created; the orchestrator appends them to the
/// run report and is their sole aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageResult {
    /// Stage name.
    pub stage: String,
    /// Stage outcome.
    pub outcome: StageOutcome,
    /// Human-readable detail line(s).
    pub detail: String,
    /// Captured output of the decisive external process, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<ProcessOutcome>,
    /// Whether this result came from an optional stage. Advisory failures
    /// never flip the overall run status.
    pub advisory: bool,
    /// When the stage started.
    pub started_at: DateTime<Utc>,
    /// When the stage ended.
    pub ended_at: DateTime<Utc>,
}

impl StageResult {
    fn new(
        stage: impl Into<String>,
        outcome: StageOutcome,
        detail: impl Into<String>,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            stage: stage.into(),
            outcome,
            detail: detail.into(),
            output: None,
            advisory: false,
            started_at,
            ended_at: Utc::now(),
        }
    }

    /// Creates a success result.
    #[must_use]
    pub fn success(
        stage: impl Into<String>,
        detail: impl Into<String>,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self::new(stage, StageOutcome::Success, detail, started_at)
    }

    /// Creates a failure result.
    #[must_use]
    pub fn failure(
        stage: impl Into<String>,
        detail: impl Into<String>,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self::new(stage, StageOutcome::Failure, detail, started_at)
    }

    /// Creates a skipped result.
    #[must_use]
    pub fn skipped(
        stage: impl Into<String>,
        detail: impl Into<String>,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self::new(stage, StageOutcome::Skipped, detail, started_at)
    }

    /// Attaches the captured output of the decisive process invocation.
    #[must_use]
    pub fn with_output(mut self, output: ProcessOutcome) -> Self {
        self.output = Some(output);
        self
    }

    /// Marks the result as coming from an optional stage.
    #[must_use]
    pub fn advisory(mut self) -> Self {
        self.advisory = true;
        self
    }

    /// Returns the stage duration in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        (self.ended_at - self.started_at).num_milliseconds() as f64
    }

    /// Returns true if the stage failed.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, StageOutcome::Failure)
    }

    /// Returns true if this failure must count against the overall verdict.
    #[must_use]
    pub fn is_blocking_failure(&self) -> bool {
        self.is_failure() && !self.advisory
    }
}
