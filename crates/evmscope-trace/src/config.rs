use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What to do with a call/create step whose stack or memory cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedStepPolicy {
    /// Log and leave the event out.
    #[default]
    Skip,
    /// Abort the whole parse with the step's error.
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Per-address bytecode fetch timeout.
    pub fetch_timeout_ms: u64,
    /// Maximum bytecode fetches in flight.
    pub fetch_concurrency: usize,
    /// Program counters reconstructed as `CALL` whatever opcode the step reports.
    pub legacy_call_pcs: Vec<u32>,
    pub malformed_step: MalformedStepPolicy,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: 5_000,
            fetch_concurrency: 8,
            legacy_call_pcs: Vec::new(),
            malformed_step: MalformedStepPolicy::Skip,
        }
    }
}

impl TraceConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}
