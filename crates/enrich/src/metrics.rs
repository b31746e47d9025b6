use serde::Serialize;
use std::time::{Duration, Instant};

/// Counters for one batch run.
pub struct BatchMetrics {
    started: Instant,

    // Counters
    entities: usize,
    succeeded: usize,
    failed: usize,
    with_results: usize,

    // Timing (in microseconds)
    total_entity_time_us: u64,
}

impl BatchMetrics {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            entities: 0,
            succeeded: 0,
            failed: 0,
            with_results: 0,
            total_entity_time_us: 0,
        }
    }

    pub fn record_entity(&mut self, success: bool, has_result: bool, elapsed: Duration) {
        self.entities += 1;
        if success {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
        if has_result {
            self.with_results += 1;
        }
        self.total_entity_time_us += elapsed.as_micros() as u64;
    }

    pub fn snapshot(&self) -> BatchSummary {
        BatchSummary {
            entities: self.entities,
            succeeded: self.succeeded,
            failed: self.failed,
            with_results: self.with_results,
            avg_entity_ms: self.avg_entity_ms(),
            total_secs: self.started.elapsed().as_secs_f64(),
        }
    }

    fn avg_entity_ms(&self) -> f64 {
        if self.entities > 0 {
            self.total_entity_time_us as f64 / self.entities as f64 / 1000.0
        } else {
            0.0
        }
    }
}

impl Default for BatchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub entities: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Entities whose output carries a non-empty result
    pub with_results: usize,
    pub avg_entity_ms: f64,
    pub total_secs: f64,
}
