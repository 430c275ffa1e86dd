//! The pipeline driver.
//!
//! Runs the stages strictly sequentially: prerequisite check, config
//! generation, firmware build, demo run, editor launch, then the report.
//! The only short-circuit is a failed prerequisite check; every other
//! stage always executes so the final report is maximally informative.

use crate::context::RunContext;
use crate::process::{CommandRunner, ProcessRunner};
use crate::report::RunReport;
use crate::stages::{
    AnalysisStage, BuildStage, ConfigStage, DemoStage, EditorStage, PrereqStage, SetupStage,
    Stage, StageResult,
};
use chrono::Utc;
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Selects a single stage for direct dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageSelector {
    /// Prerequisite check.
    Check,
    /// Firmware toolchain setup.
    Setup,
    /// Firmware compilation.
    Compile,
    /// Configuration materialization.
    Config,
    /// Editor launch.
    Editor,
    /// Demo build and run.
    Demo,
    /// Simulation behavior guide.
    Analyze,
}

impl fmt::Display for StageSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Check => write!(f, "check"),
            Self::Setup => write!(f, "setup"),
            Self::Compile => write!(f, "compile"),
            Self::Config => write!(f, "config"),
            Self::Editor => write!(f, "editor"),
            Self::Demo => write!(f, "demo"),
            Self::Analyze => write!(f, "analyze"),
        }
    }
}

/// Drives the stage sequence over a shared run context.
pub struct Orchestrator {
    ctx: RunContext,
    runner: Arc<dyn CommandRunner>,
}

impl Orchestrator {
    /// Creates an orchestrator using the real process runner.
    #[must_use]
    pub fn new(ctx: RunContext) -> Self {
        Self::with_runner(ctx, Arc::new(ProcessRunner::new()))
    }

    /// Creates an orchestrator with a custom runner. Tests use this with a
    /// scripted runner.
    #[must_use]
    pub fn with_runner(ctx: RunContext, runner: Arc<dyn CommandRunner>) -> Self {
        Self { ctx, runner }
    }

    /// The run context the orchestrator threads through stages.
    #[must_use]
    pub fn context(&self) -> &RunContext {
        &self.ctx
    }

    /// Runs the full pipeline and returns the aggregated report.
    pub async fn run_all(&self) -> RunReport {
        let mut report = RunReport::new();
        info!(run_id = %report.run_id, root = %self.ctx.project_root().display(), "starting full run");

        let prereq = PrereqStage::new(self.runner.clone());
        let verdict = prereq.check(&self.ctx).await;
        let started = Utc::now();
        if verdict.ready {
            report.push(StageResult::success(prereq.name(), verdict.summary(), started));
        } else {
            // Mandatory prerequisite missing: halt before any later stage.
            report.push(StageResult::failure(prereq.name(), verdict.summary(), started));
            info!(run_id = %report.run_id, "prerequisites not met; skipping remaining stages");
            return report;
        }

        let stages: Vec<Box<dyn Stage>> = vec![
            Box::new(ConfigStage::new()),
            Box::new(BuildStage::new(self.runner.clone())),
            Box::new(DemoStage::new(self.runner.clone())),
            Box::new(EditorStage::new(self.runner.clone())),
        ];
        for stage in stages {
            let mut result = stage.execute(&self.ctx).await;
            if stage.optional() {
                result = result.advisory();
            }
            info!(stage = stage.name(), outcome = %result.outcome, "stage finished");
            report.push(result);
        }

        report
    }

    /// Executes exactly one stage and returns a report containing only its
    /// result. Direct dispatch never marks the result advisory: the caller
    /// asked for that stage, so its failure is the run's failure.
    pub async fn run_single(&self, selector: StageSelector) -> RunReport {
        let mut report = RunReport::new();
        info!(run_id = %report.run_id, stage = %selector, "direct dispatch");

        let stage: Box<dyn Stage> = match selector {
            StageSelector::Check => Box::new(PrereqStage::new(self.runner.clone())),
            StageSelector::Setup => Box::new(SetupStage::new(self.runner.clone())),
            StageSelector::Compile => Box::new(BuildStage::new(self.runner.clone())),
            StageSelector::Config => Box::new(ConfigStage::new()),
            StageSelector::Editor => Box::new(EditorStage::new(self.runner.clone())),
            StageSelector::Demo => Box::new(DemoStage::new(self.runner.clone())),
            StageSelector::Analyze => Box::new(AnalysisStage::new()),
        };

        report.push(stage.execute(&self.ctx).await);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::StageOutcome;
    use crate::testing::{project_with_sketch, ScriptedRunner};

    fn all_tools(runner: &ScriptedRunner) {
        runner.respond_success("code --version", "1.92.0");
        runner.respond_success("arduino-cli version", "arduino-cli Version: 1.0.4");
        runner.respond_success("cargo --version", "cargo 1.80.0");
    }

    #[tokio::test]
    async fn test_full_run_executes_all_stages_in_order() {
        let (_dir, ctx) = project_with_sketch();
        let runner = Arc::new(ScriptedRunner::new());
        all_tools(runner.as_ref());
        runner.respond_exit("arduino-cli compile", 1, "", "no board");
        runner.respond_success("cargo build", "");
        runner.respond_timeout("cargo run");
        runner.respond_success("code .", "");

        let orchestrator = Orchestrator::with_runner(ctx, runner);
        let report = orchestrator.run_all().await;

        let names: Vec<&str> = report.results.iter().map(|r| r.stage.as_str()).collect();
        assert_eq!(
            names,
            vec!["prerequisites", "config", "compile", "demo", "editor"]
        );
        // Compile failed but is optional, so the run still succeeds.
        assert_eq!(report.results[2].outcome, StageOutcome::Failure);
        assert!(report.is_success());
    }

    #[tokio::test]
    async fn test_missing_mandatory_tool_short_circuits() {
        let (_dir, ctx) = project_with_sketch();
        let runner = Arc::new(ScriptedRunner::new());
        runner.respond_success("code --version", "1.92.0");
        runner.respond_success("arduino-cli version", "arduino-cli Version: 1.0.4");
        // cargo unmatched -> not found -> blocking

        let orchestrator = Orchestrator::with_runner(ctx.clone(), runner.clone());
        let report = orchestrator.run_all().await;

        assert_eq!(report.results.len(), 1);
        assert_eq!(report.overall(), StageOutcome::Failure);
        assert!(!ctx.manifest_path().exists());
        // No stage after the probes invoked anything.
        assert_eq!(runner.call_lines().len(), 3);
    }

    #[tokio::test]
    async fn test_direct_dispatch_runs_exactly_one_stage() {
        let (_dir, ctx) = project_with_sketch();
        let runner = Arc::new(ScriptedRunner::new());

        let orchestrator = Orchestrator::with_runner(ctx.clone(), runner.clone());
        let report = orchestrator.run_single(StageSelector::Config).await;

        assert_eq!(report.results.len(), 1);
        assert!(report.is_success());
        assert!(ctx.manifest_path().exists());
        assert!(runner.call_lines().is_empty());
    }

    #[tokio::test]
    async fn test_direct_dispatch_failure_counts() {
        let (_dir, ctx) = project_with_sketch();
        let runner = Arc::new(ScriptedRunner::new());
        runner.respond_exit("cargo build", 101, "", "broken");

        let orchestrator = Orchestrator::with_runner(ctx, runner);
        let report = orchestrator.run_single(StageSelector::Demo).await;
        assert_eq!(report.overall(), StageOutcome::Failure);
    }

    #[test]
    fn test_selector_display() {
        assert_eq!(StageSelector::Compile.to_string(), "compile");
        assert_eq!(StageSelector::Analyze.to_string(), "analyze");
    }
}
