//! Command-line entry point for the simulation test harness.

use anyhow::Result;
use clap::{Parser, Subcommand};
use simharness::context::RunContext;
use simharness::pipeline::{Orchestrator, StageSelector};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "simharness",
    about = "Staged test harness for ESP32 firmware runs in the Wokwi simulator",
    long_about = None
)]
struct Cli {
    /// Project root directory.
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Single-stage direct dispatch; omit to run the full pipeline.
#[derive(Debug, Subcommand)]
enum Command {
    /// Check required tools and project artifacts.
    Check,
    /// Install the firmware board package and libraries.
    Setup,
    /// Compile the firmware sketch.
    Compile,
    /// Generate the simulator manifest and circuit diagram.
    Config,
    /// Open the project in the editor.
    Editor,
    /// Build and run the native mining demo.
    Demo,
    /// Print the expected simulation behavior guide.
    Analyze,
}

impl From<&Command> for StageSelector {
    fn from(command: &Command) -> Self {
        match command {
            Command::Check => Self::Check,
            Command::Setup => Self::Setup,
            Command::Compile => Self::Compile,
            Command::Config => Self::Config,
            Command::Editor => Self::Editor,
            Command::Demo => Self::Demo,
            Command::Analyze => Self::Analyze,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let orchestrator = Orchestrator::new(RunContext::new(cli.project_root));

    let report = match cli.command {
        Some(ref command) => orchestrator.run_single(command.into()).await,
        None => orchestrator.run_all().await,
    };

    print!("{}", report.render());
    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
