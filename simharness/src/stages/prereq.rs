//! Prerequisite checking: tool probes and required project artifacts.

use super::{Stage, StageResult};
use crate::context::RunContext;
use crate::process::CommandRunner;
use crate::tools::{probe_tool, Requirement, Tool, ToolAvailability};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Verdict of the prerequisite check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrereqReport {
    /// True iff no mandatory check failed.
    pub ready: bool,
    /// Mandatory problems that halt the pipeline.
    pub blocking: Vec<String>,
    /// Advisory problems reported but tolerated.
    pub warnings: Vec<String>,
    /// Probed availability per tool, in probe order.
    pub tools: Vec<(Tool, ToolAvailability)>,
}

impl PrereqReport {
    /// Renders a one-line summary of the verdict.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.ready {
            if self.warnings.is_empty() {
                "all prerequisites satisfied".to_string()
            } else {
                format!(
                    "prerequisites satisfied with {} warning(s): {}",
                    self.warnings.len(),
                    self.warnings.join("; ")
                )
            }
        } else {
            format!("blocked: {}", self.blocking.join("; "))
        }
    }
}

/// Checks external tools and required project artifacts.
pub struct PrereqStage {
    runner: Arc<dyn CommandRunner>,
}

impl PrereqStage {
    /// Creates the stage with the given runner.
    #[must_use]
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// Runs every probe and filesystem check, in order: editor, firmware
    /// toolchain, native toolchain, then required artifacts.
    pub async fn check(&self, ctx: &RunContext) -> PrereqReport {
        let mut blocking = Vec::new();
        let mut warnings = Vec::new();
        let mut tools = Vec::new();

        for tool in [Tool::Editor, Tool::ArduinoCli, Tool::Cargo] {
            let availability = probe_tool(self.runner.as_ref(), tool).await;
            match (&availability, tool.requirement()) {
                (ToolAvailability::Available(version), _) => {
                    info!(tool = %tool, version = %version, "tool available");
                }
                (_, Requirement::Mandatory) => {
                    blocking.push(format!(
                        "{tool} not found (install Rust from https://rustup.rs/)"
                    ));
                }
                (ToolAvailability::Missing, Requirement::Optional) => {
                    warnings.push(format!(
                        "{tool} not found; firmware compilation will be skipped"
                    ));
                }
                (_, Requirement::Optional) | (ToolAvailability::Unknown, Requirement::Advisory) => {
                    warnings.push(format!("{tool} did not answer its version probe"));
                }
                (ToolAvailability::Missing, Requirement::Advisory) => {
                    warnings.push(format!(
                        "{tool} not found in PATH; open the project manually"
                    ));
                }
            }
            tools.push((tool, availability));
        }

        if !ctx.sketch_path().exists() {
            blocking.push(format!(
                "missing required artifact: {}",
                ctx.sketch_path().display()
            ));
        }

        for issue in &warnings {
            warn!(%issue, "prerequisite warning");
        }
        for issue in &blocking {
            warn!(%issue, "blocking prerequisite");
        }

        PrereqReport {
            ready: blocking.is_empty(),
            blocking,
            warnings,
            tools,
        }
    }
}

#[async_trait]
impl Stage for PrereqStage {
    fn name(&self) -> &str {
        "prerequisites"
    }

    async fn execute(&self, ctx: &RunContext) -> StageResult {
        let started = Utc::now();
        let report = self.check(ctx).await;
        if report.ready {
            StageResult::success(self.name(), report.summary(), started)
        } else {
            StageResult::failure(self.name(), report.summary(), started)
        }
    }
}
