//! Simulation runner - executes one configured run end to end.

use eventsim_core::{
    EventOutcome, ModuleRegistry, RunMetrics, SimError, Simulation, SimulationConfig,
};
use tracing::{debug, error};

/// Results from running a simulation.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Initial seed of the run (configured or taken from the clock)
    pub seed: u64,

    /// Worker threads used
    pub workers: usize,

    /// Module chain in execution order
    pub modules: Vec<String>,

    /// One outcome per event, in event order
    pub outcomes: Vec<EventOutcome>,

    /// Metrics collected during the run
    pub metrics: RunMetrics,
}

impl RunSummary {
    /// Returns one output line per event.
    pub fn outputs(&self) -> Vec<String> {
        self.outcomes.iter().map(EventOutcome::line).collect()
    }

    /// Returns true if every event produced an output.
    pub fn passed(&self) -> bool {
        self.metrics.failed == 0
    }
}

/// Runs a configured simulation.
pub struct SimulationRunner {
    /// Configuration loaded from file
    config: SimulationConfig,

    /// Modules available to `init`
    registry: ModuleRegistry,
}

impl SimulationRunner {
    /// Creates a runner with the built-in modules.
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            registry: ModuleRegistry::builtin(),
        }
    }

    /// Replaces the module registry.
    pub fn with_registry(mut self, registry: ModuleRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Overrides the configured worker count.
    pub fn with_workers(mut self, workers: Option<usize>) -> Self {
        if let Some(workers) = workers {
            self.config.workers = workers;
        }
        self
    }

    /// Overrides the configured seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.config.seed = seed;
        }
        self
    }

    /// Returns the effective configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Initializes the module chain and runs every event.
    ///
    /// Fails before any event runs if a module name does not resolve.
    pub fn execute(self) -> Result<RunSummary, SimError> {
        let mut simulation = Simulation::new(self.config, self.registry);

        if let Err(e) = simulation.init() {
            error!("Failed to initialize simulation: {}", e);
            return Err(e);
        }

        let modules = simulation.config().modules.clone();
        let workers = simulation.config().workers;
        let run = simulation.run()?;

        debug!(
            "Finished simulation with {} events in {} ms",
            run.metrics.events,
            run.metrics.elapsed.as_millis()
        );

        Ok(RunSummary {
            seed: run.seed,
            workers,
            modules,
            outcomes: run.outcomes,
            metrics: run.metrics,
        })
    }
}
