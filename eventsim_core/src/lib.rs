//! eventsim Core - Deterministic Parallel Event Simulation
//!
//! This library runs a fixed, ordered chain of modules against a fixed number
//! of independent events and gathers one result string per event:
//! 1. **Module registry**: closed name → function table, modules are pure over a seed
//! 2. **Worker pool**: fixed-size thread pool returning a one-shot handle per submission
//! 3. **Orchestrator**: single producer that draws seeds, submits tasks, collects in order
//!
//! Output is byte-identical for any worker count, including zero.

pub mod handle;
pub mod metrics;
pub mod module;
pub mod pool;
pub mod queue;
pub mod simulation;
pub mod task;

// Re-export key types for convenience
pub use handle::{ResultHandle, Resolver};
pub use metrics::RunMetrics;
pub use module::{Module, ModuleFn, ModuleRegistry};
pub use pool::{DrainReport, WorkerPool, MAX_WORKERS};
pub use queue::WorkQueue;
pub use simulation::{EventOutcome, Simulation, SimulationConfig, SimulationRun};
pub use task::Task;

pub use eventsim_env::{Event, ModuleError, SeedStream, SimError, TaskError};
