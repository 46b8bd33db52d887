//! Simulation Orchestrator - drives one run from seeds to ordered results.
//!
//! The orchestrator is the single producer of the run:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Simulation                            │
//! │  SeedStream ──► Event{n, seed} ──► Task{event, chain}        │
//! │                                         │ submit             │
//! │                                         ▼                    │
//! │                               WorkerPool (0..N threads)      │
//! │                                         │ ResultHandle       │
//! │  ordered results ◄── wait in submission order ◄──┘           │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! All seeds are drawn on the caller's thread, in event order, before the
//! event is handed to any worker. Modules only see the seed value, so the
//! output does not depend on the number of workers or on completion order.
//!
//! # Usage
//!
//! ```
//! use eventsim_core::{ModuleRegistry, Simulation, SimulationConfig};
//!
//! let config = SimulationConfig {
//!     event_count: 3,
//!     seed: Some(42),
//!     workers: 2,
//!     modules: vec!["Module1".to_string()],
//! };
//!
//! let mut simulation = Simulation::new(config, ModuleRegistry::builtin());
//! simulation.init().unwrap();
//! let run = simulation.run().unwrap();
//! assert_eq!(run.outputs().len(), 3);
//! ```

use crate::metrics::RunMetrics;
use crate::module::{Module, ModuleRegistry};
use crate::pool::WorkerPool;
use crate::task::Task;
use eventsim_env::{Event, SeedStream, SimError, TaskError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of events to simulate
    pub event_count: u64,

    /// Initial seed of the seed stream (None = taken from the clock)
    pub seed: Option<u64>,

    /// Worker threads (0 = run every event on the caller's thread)
    pub workers: usize,

    /// Module names in execution order
    pub modules: Vec<String>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            event_count: 10,
            seed: None,
            workers: 0,
            modules: vec!["Module1".to_string()],
        }
    }
}

/// Result slot of one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome {
    /// The event that was simulated
    pub event: Event,

    /// Concatenated chain output, or why it could not be produced
    pub result: Result<String, TaskError>,
}

impl EventOutcome {
    /// Returns the output line for this event.
    ///
    /// Failed events are rendered as `<error event=#n: reason>` so the output
    /// keeps exactly one line per event.
    pub fn line(&self) -> String {
        match &self.result {
            Ok(output) => output.clone(),
            Err(e) => format!("<error event=#{}: {}>", self.event.sequence(), e),
        }
    }

    /// Returns true if the module chain completed.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Everything one call to [`Simulation::run`] produced.
#[derive(Debug, Clone)]
pub struct SimulationRun {
    /// Initial seed of the run's seed stream
    pub seed: u64,

    /// One outcome per event, ordered by sequence number
    pub outcomes: Vec<EventOutcome>,

    /// Counters gathered during the run
    pub metrics: RunMetrics,
}

impl SimulationRun {
    /// Returns one output line per event, in event order.
    pub fn outputs(&self) -> Vec<String> {
        self.outcomes.iter().map(EventOutcome::line).collect()
    }

    /// Returns the outcomes of events that failed.
    pub fn failures(&self) -> Vec<&EventOutcome> {
        self.outcomes.iter().filter(|o| !o.is_ok()).collect()
    }
}

/// The simulation engine.
///
/// Owns the module chain, the seed stream and the run configuration. A fresh
/// [`WorkerPool`] is created for every run and drained before results are read.
pub struct Simulation {
    /// Configuration
    config: SimulationConfig,

    /// Name → module table used by `init`
    registry: ModuleRegistry,

    /// Top-level generator; only ever advanced on the caller's thread
    seeds: SeedStream,

    /// Resolved chain, set by a successful `init`
    chain: Option<Arc<[Module]>>,
}

impl Simulation {
    /// Creates a simulation. Nothing runs until [`Simulation::init`] succeeds.
    pub fn new(config: SimulationConfig, registry: ModuleRegistry) -> Self {
        let seeds = match config.seed {
            Some(seed) => SeedStream::new(seed),
            None => SeedStream::from_clock(),
        };

        Self {
            config,
            registry,
            seeds,
            chain: None,
        }
    }

    /// Resolves the configured module names.
    pub fn init(&mut self) -> Result<(), SimError> {
        let names = self.config.modules.clone();
        self.init_with(&names)
    }

    /// Resolves `names` in order into the module chain.
    ///
    /// Stops at the first unknown name; the simulation then stays
    /// uninitialized and [`Simulation::run`] refuses to start.
    pub fn init_with<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), SimError> {
        self.chain = None;

        let mut chain = Vec::with_capacity(names.len());
        for name in names.iter().map(AsRef::as_ref) {
            match self.registry.resolve(name) {
                Some(module) => {
                    info!("Loaded module: {}", name);
                    chain.push(module);
                }
                None => {
                    error!("Invalid module name: {}", name);
                    return Err(SimError::unknown_module(name));
                }
            }
        }

        self.config.modules = names.iter().map(|n| n.as_ref().to_string()).collect();
        self.chain = Some(chain.into());
        Ok(())
    }

    /// Returns true once a module chain was resolved.
    pub fn is_ready(&self) -> bool {
        self.chain.is_some()
    }

    /// Returns the names of the resolved chain (empty before `init`).
    pub fn chain_names(&self) -> Vec<&str> {
        self.chain
            .as_deref()
            .map(|chain| chain.iter().map(Module::name).collect())
            .unwrap_or_default()
    }

    /// Returns the initial seed of the seed stream.
    pub fn seed(&self) -> u64 {
        self.seeds.initial()
    }

    /// Returns the run configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Simulates every event and returns the outcomes in event order.
    ///
    /// Never stops early: a failed event yields an error entry, so the number
    /// of outcomes always equals the configured event count. Calling `run`
    /// again continues the same seed stream.
    pub fn run(&mut self) -> Result<SimulationRun, SimError> {
        let chain = self.chain.clone().ok_or(SimError::NotInitialized)?;
        let event_count = self.config.event_count;
        let started = Instant::now();

        info!(
            events = event_count,
            workers = self.config.workers,
            seed = self.seeds.initial(),
            "Starting simulation"
        );

        let mut pool = WorkerPool::new(self.config.workers)?;
        let mut pending = Vec::new();

        for sequence in 1..=event_count {
            let event = Event::new(sequence, self.seeds.next_seed());
            let task = Task::new(event, Arc::clone(&chain));

            let handle = pool.submit(move || {
                let result = task.execute();
                let current = thread::current();
                debug!(
                    event = sequence,
                    thread = current.name().unwrap_or("unnamed"),
                    "Executed event"
                );
                result
            })?;
            pending.push((event, handle));
        }

        let submitted = pending.len() as u64;
        let drain = pool.drain();

        let outcomes: Vec<EventOutcome> = pending
            .into_iter()
            .map(|(event, handle)| {
                let result = handle.wait().and_then(|chain_result| chain_result);
                if let Err(e) = &result {
                    warn!(%event, error = %e, "Event failed");
                }
                EventOutcome { event, result }
            })
            .collect();

        let metrics = RunMetrics {
            events: event_count,
            submitted,
            resolved: outcomes.len() as u64,
            failed: outcomes.iter().filter(|o| !o.is_ok()).count() as u64,
            workers: self.config.workers,
            elapsed: started.elapsed(),
            drain,
        };

        info!(
            events = metrics.events,
            failed = metrics.failed,
            elapsed_ms = metrics.elapsed.as_millis() as u64,
            "Simulation finished"
        );

        Ok(SimulationRun {
            seed: self.seeds.initial(),
            outcomes,
            metrics,
        })
    }
}
