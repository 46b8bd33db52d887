//! Run Metrics
//! ===========
//!
//! Counters gathered by the orchestrator for one `run`:
//! - **Cardinality**: events scheduled, handles submitted, handles resolved
//! - **Failures**: events whose chain produced an error entry
//! - **Throughput**: wall time of the run and events per second
//!
//! The pool's own [`DrainReport`] is embedded so callers can check that every
//! worker was joined and the queue was left empty.

use crate::pool::DrainReport;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Metrics collected during one simulation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    /// Events scheduled (equals the configured event count)
    pub events: u64,

    /// Result handles created by submissions
    pub submitted: u64,

    /// Result handles read back by the collector
    pub resolved: u64,

    /// Events whose entry is an error
    pub failed: u64,

    /// Worker threads used (0 = caller's thread)
    pub workers: usize,

    /// Wall time from the first seed draw to the last collected result
    pub elapsed: Duration,

    /// Pool lifecycle summary
    pub drain: DrainReport,
}

impl RunMetrics {
    /// Returns true if every submitted handle was read back and the pool
    /// left nothing behind.
    pub fn all_resolved(&self) -> bool {
        self.submitted == self.events
            && self.resolved == self.submitted
            && self.drain.queue_remaining == 0
            && self.drain.workers_joined == self.workers
    }

    /// Returns the throughput of the run.
    pub fn events_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.events as f64 / secs
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_resolved() {
        let mut metrics = RunMetrics {
            events: 10,
            submitted: 10,
            resolved: 10,
            workers: 2,
            drain: DrainReport {
                workers_joined: 2,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(metrics.all_resolved());

        metrics.resolved = 9;
        assert!(!metrics.all_resolved());
    }

    #[test]
    fn test_events_per_sec() {
        let metrics = RunMetrics {
            events: 500,
            elapsed: Duration::from_millis(250),
            ..Default::default()
        };
        assert!((metrics.events_per_sec() - 2000.0).abs() < 1e-9);

        assert_eq!(RunMetrics::default().events_per_sec(), 0.0);
    }
}
