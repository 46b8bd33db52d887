//! JSON exporter for simulation runs.
//!
//! Writes the per-event results of a run together with the settings needed
//! to reproduce it.

use crate::runner::RunSummary;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Result of a single event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub sequence: u64,
    pub seed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Complete run export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunExport {
    /// Initial seed of the run
    pub seed: u64,

    /// Worker threads used
    pub workers: usize,

    /// Module chain in execution order
    pub modules: Vec<String>,

    /// Number of events simulated
    pub event_count: u64,

    /// Events whose chain failed
    pub failed: u64,

    /// Wall time of the run in milliseconds
    pub elapsed_ms: u64,

    /// All events in sequence order
    pub events: Vec<EventRecord>,
}

impl RunExport {
    /// Builds an export from a finished run.
    pub fn from_summary(summary: &RunSummary) -> Self {
        let events = summary
            .outcomes
            .iter()
            .map(|outcome| {
                let (output, error) = match &outcome.result {
                    Ok(output) => (Some(output.clone()), None),
                    Err(e) => (None, Some(e.to_string())),
                };
                EventRecord {
                    sequence: outcome.event.sequence(),
                    seed: outcome.event.seed(),
                    output,
                    error,
                }
            })
            .collect();

        Self {
            seed: summary.seed,
            workers: summary.workers,
            modules: summary.modules.clone(),
            event_count: summary.metrics.events,
            failed: summary.metrics.failed,
            elapsed_ms: summary.metrics.elapsed.as_millis() as u64,
            events,
        }
    }

    /// Serializes the export as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = self.to_json()?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
