//! End-to-end pipeline scenarios against a scripted command runner.

use simharness::context::RunContext;
use simharness::pipeline::{Orchestrator, StageSelector};
use simharness::stages::StageOutcome;
use simharness::testing::{write_sketch, ScriptedRunner};
use std::sync::Arc;
use tempfile::TempDir;

fn project() -> (TempDir, RunContext) {
    let dir = tempfile::tempdir().unwrap();
    write_sketch(dir.path()).unwrap();
    let ctx = RunContext::new(dir.path());
    (dir, ctx)
}

fn with_all_tools(runner: &ScriptedRunner) {
    runner.respond_success("code --version", "1.92.0");
    runner.respond_success("arduino-cli version", "arduino-cli Version: 1.0.4");
    runner.respond_success("cargo --version", "cargo 1.80.0");
}

fn outcome_of<'a>(
    report: &'a simharness::report::RunReport,
    stage: &str,
) -> &'a simharness::stages::StageResult {
    report
        .results
        .iter()
        .find(|r| r.stage == stage)
        .unwrap_or_else(|| panic!("stage {stage} missing from report"))
}

/// Scenario A: everything present, full pipeline succeeds and both config
/// documents land on disk with the fixed scenario.
#[tokio::test]
async fn full_run_with_everything_present_succeeds() {
    let (_dir, ctx) = project();
    let runner = Arc::new(ScriptedRunner::new());
    with_all_tools(&runner);
    runner.respond_success("arduino-cli compile", "");
    runner.respond_success("cargo build", "");
    runner.respond_timeout("cargo run");
    runner.respond_success("code .", "");
    // The compile step is scripted, so lay down its expected artifacts.
    std::fs::write(ctx.firmware_elf(), b"elf").unwrap();
    std::fs::write(ctx.firmware_bin(), b"bin").unwrap();

    let report = Orchestrator::with_runner(ctx.clone(), runner).run_all().await;

    assert!(report.is_success());
    assert_eq!(report.results.len(), 5);

    let manifest = std::fs::read_to_string(ctx.manifest_path()).unwrap();
    assert!(manifest.contains(r#"name = "ESP32 Mining Test""#));
    assert!(manifest.contains("timeout = 60000"));
    assert!(ctx.diagram_path().exists());
}

/// Scenario B: the mandatory native toolchain is absent, so the run halts
/// at the prerequisite check with exactly one blocking issue and writes
/// nothing.
#[tokio::test]
async fn full_run_without_mandatory_toolchain_halts() {
    let (_dir, ctx) = project();
    let runner = Arc::new(ScriptedRunner::new());
    runner.respond_success("code --version", "1.92.0");
    runner.respond_success("arduino-cli version", "arduino-cli Version: 1.0.4");

    let report = Orchestrator::with_runner(ctx.clone(), runner).run_all().await;

    assert_eq!(report.overall(), StageOutcome::Failure);
    assert_eq!(report.results.len(), 1);
    let prereq = outcome_of(&report, "prerequisites");
    assert_eq!(prereq.outcome, StageOutcome::Failure);
    assert!(prereq.detail.contains("cargo"));
    assert!(!prereq.detail.contains(';'), "expected exactly one blocking issue");
    assert!(!ctx.manifest_path().exists());
    assert!(!ctx.diagram_path().exists());
}

/// Scenario C: direct dispatch of `config` runs only the materializer.
#[tokio::test]
async fn direct_config_dispatch_runs_only_config() {
    let (_dir, ctx) = project();
    let runner = Arc::new(ScriptedRunner::new());

    let report = Orchestrator::with_runner(ctx.clone(), runner.clone())
        .run_single(StageSelector::Config)
        .await;

    assert!(report.is_success());
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].stage, "config");
    assert!(ctx.manifest_path().exists());
    // No build, demo, or editor processes were invoked.
    assert!(runner.call_lines().is_empty());
}

/// Scenario D: the compiler exits cleanly but produces no artifacts; the
/// build stage fails while the earlier stages keep their success.
#[tokio::test]
async fn clean_compile_without_artifacts_fails_build_stage() {
    let (_dir, ctx) = project();
    let runner = Arc::new(ScriptedRunner::new());
    with_all_tools(&runner);
    runner.respond_success("arduino-cli compile", "");
    runner.respond_success("cargo build", "");
    runner.respond_timeout("cargo run");
    runner.respond_success("code .", "");

    let report = Orchestrator::with_runner(ctx, runner).run_all().await;

    assert_eq!(outcome_of(&report, "prerequisites").outcome, StageOutcome::Success);
    assert_eq!(outcome_of(&report, "config").outcome, StageOutcome::Success);
    let build = outcome_of(&report, "compile");
    assert_eq!(build.outcome, StageOutcome::Failure);
    assert!(build.detail.contains("artifacts not produced"));
}

/// Missing optional firmware toolchain degrades the build stage to Skipped
/// and leaves the overall run successful.
#[tokio::test]
async fn missing_optional_toolchain_skips_build_stage() {
    let (_dir, ctx) = project();
    let runner = Arc::new(ScriptedRunner::new());
    runner.respond_success("code --version", "1.92.0");
    runner.respond_success("cargo --version", "cargo 1.80.0");
    runner.respond_success("cargo build", "");
    runner.respond_timeout("cargo run");
    runner.respond_success("code .", "");

    let report = Orchestrator::with_runner(ctx, runner).run_all().await;

    assert_eq!(outcome_of(&report, "compile").outcome, StageOutcome::Skipped);
    assert!(report.is_success());
}

/// A failing editor launch only degrades its own stage.
#[tokio::test]
async fn failed_editor_launch_never_blocks_the_run() {
    let (_dir, ctx) = project();
    let runner = Arc::new(ScriptedRunner::new());
    with_all_tools(&runner);
    runner.respond_exit("arduino-cli compile", 1, "", "no board");
    runner.respond_success("cargo build", "");
    runner.respond_success("cargo run", "done");
    runner.respond_exit("code .", 1, "", "no display");

    let report = Orchestrator::with_runner(ctx, runner).run_all().await;

    assert_eq!(outcome_of(&report, "editor").outcome, StageOutcome::Skipped);
    assert!(report.is_success());
    // The report still enumerates every stage, including the failed compile.
    assert!(report.render().contains("compile"));
}
