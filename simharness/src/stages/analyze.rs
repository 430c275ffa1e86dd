//! Simulation behavior guide stage.
//!
//! Summarizes what a correct simulator run looks like and how to monitor
//! it. Reachable through direct dispatch only.

use super::{Stage, StageResult};
use crate::context::RunContext;
use async_trait::async_trait;
use chrono::Utc;

const GUIDE: &str = "\
Expected simulation behavior:
  - board joins the guest WiFi network
  - mining tasks start on both cores
  - tensor computations execute between share submissions
  - statistics print on the serial monitor every 10 seconds
  - red LED blinks with core 0 activity, green LED with core 1
How to monitor:
  - serial monitor: mining output and statistics
  - diagram view: LED activity indicators
  - logic analyzer: GPIO signals on D2 and D4";

/// Prints the expected-behavior guide for a human observer.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisStage;

impl AnalysisStage {
    /// Creates the stage.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// The guide text the stage reports.
    #[must_use]
    pub fn guide() -> &'static str {
        GUIDE
    }
}

#[async_trait]
impl Stage for AnalysisStage {
    fn name(&self) -> &str {
        "analysis"
    }

    fn optional(&self) -> bool {
        true
    }

    async fn execute(&self, _ctx: &RunContext) -> StageResult {
        StageResult::success(self.name(), GUIDE, Utc::now())
    }
}
