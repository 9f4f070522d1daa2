use serde::Serialize;
use std::fmt;

use crate::models::{PriorityCounts, SimConfig};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StopReason {
    TargetReached,
    QueueExhausted,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::TargetReached => write!(f, "target-reached"),
            StopReason::QueueExhausted => write!(f, "queue-exhausted"),
        }
    }
}

/// Running counters owned by the engine.
#[derive(Clone, Debug, Default)]
pub struct Counters {
    pub generated: u64,
    pub served: u64,
    pub rejected: u64,
    pub served_by_priority: PriorityCounts<u64>,
    pub rejected_by_priority: PriorityCounts<u64>,
    pub total_wait: f64,
    pub wait_by_priority: PriorityCounts<f64>,
    pub arrivals_processed: u64,
    pub completions_processed: u64,
}

#[derive(Clone, Debug, Serialize)]
pub struct DeviceSummary {
    pub id: usize,
    pub busy_hours: f64,
    pub utilization_pct: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct WaitSummary {
    pub avg_hours: f64,
    pub avg_minutes: f64,
    pub by_priority_hours: PriorityCounts<f64>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SimulationResult {
    pub config: SimConfig,
    pub stop_reason: StopReason,
    pub generated: u64,
    pub served: u64,
    pub rejected: u64,
    pub served_by_priority: PriorityCounts<u64>,
    pub rejected_by_priority: PriorityCounts<u64>,
    pub wait: WaitSummary,
    pub devices: Vec<DeviceSummary>,
    pub elapsed_hours: f64,
    pub buffered: usize,
    pub in_service: usize,
    pub pending_arrivals: usize,
    pub arrivals_processed: u64,
    pub completions_processed: u64,
}
