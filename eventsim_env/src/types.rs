//! Common types for the eventsim environment.

use serde::{Deserialize, Serialize};

/// One simulation trial.
///
/// Carries the 1-based sequence number of the trial and the seed drawn for it
/// by the orchestrator. Events are `Copy` so a task owns its event by value
/// and nothing about it is shared between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    sequence: u64,
    seed: u64,
}

impl Event {
    /// Creates an event with the given sequence number and seed.
    pub fn new(sequence: u64, seed: u64) -> Self {
        Self { sequence, seed }
    }

    /// Returns the 1-based sequence number of this event.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns the seed every module of this event derives its randomness from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "event #{}", self.sequence)
    }
}
