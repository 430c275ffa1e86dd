//! External process invocation.
//!
//! This module provides:
//! - [`ProcessInvocation`]: a transient description of one external call
//! - [`ProcessOutcome`]: the structured, never-raising result of a call
//! - [`CommandRunner`]: the trait stages invoke processes through
//! - [`ProcessRunner`]: the tokio-backed implementation

mod invocation;
mod runner;

pub use invocation::ProcessInvocation;
pub use runner::{CommandRunner, ProcessOutcome, ProcessRunner, ProcessStatus};
