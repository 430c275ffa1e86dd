//! # Simharness
//!
//! A staged test harness orchestrating ESP32 firmware runs in the Wokwi
//! simulator.
//!
//! The harness verifies tooling and project artifacts, materializes the
//! simulator configuration, optionally compiles the firmware, drives a
//! companion native demo under a bounded timeout, opens the project in an
//! editor, and aggregates every stage outcome into a single report:
//!
//! - **Stage-based execution**: discrete, independently reportable steps
//! - **Non-raising process layer**: tool absence and nonzero exits are data
//! - **Declarative skip/fail policy**: mandatory tools block, optional tools
//!   degrade their stage to Skipped
//! - **Best-effort pipeline**: after the prerequisite gate, every stage runs
//!   so the final report is maximally informative
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use simharness::prelude::*;
//!
//! let ctx = RunContext::new(".");
//! let report = Orchestrator::new(ctx).run_all().await;
//! print!("{}", report.render());
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod context;
pub mod errors;
pub mod manifest;
pub mod pipeline;
pub mod process;
pub mod report;
pub mod stages;
pub mod testing;
pub mod tools;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::context::RunContext;
    pub use crate::errors::HarnessError;
    pub use crate::manifest::{DiagramDocument, WokwiManifest};
    pub use crate::pipeline::{Orchestrator, StageSelector};
    pub use crate::process::{
        CommandRunner, ProcessInvocation, ProcessOutcome, ProcessRunner, ProcessStatus,
    };
    pub use crate::report::RunReport;
    pub use crate::stages::{Stage, StageOutcome, StageResult};
    pub use crate::tools::{Requirement, Tool, ToolAvailability};
}
