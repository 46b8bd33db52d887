//! Error types for the eventsim engine.

use thiserror::Error;

/// Errors raised while setting up or driving a simulation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    /// A requested module name has no registered implementation
    #[error("Unknown module: {0}")]
    UnknownModule(String),

    /// Work was submitted after the queue started draining
    #[error("Submission after the work queue was shut down")]
    QueueShutdown,

    /// `run` was called before a successful `init`
    #[error("Simulation is not initialized")]
    NotInitialized,

    /// The OS refused to start a worker thread
    #[error("Failed to spawn worker thread: {0}")]
    WorkerSpawn(String),
}

impl SimError {
    /// Creates an unknown-module error.
    pub fn unknown_module(name: impl Into<String>) -> Self {
        Self::UnknownModule(name.into())
    }
}

/// Failure carried by a task's result handle in place of its output.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// A module in the chain reported a failure
    #[error("module {module} failed: {reason}")]
    Module { module: String, reason: String },

    /// The task panicked while running
    #[error("task panicked: {0}")]
    Panicked(String),

    /// The task was dropped before producing a result
    #[error("task was dropped without a result")]
    Abandoned,
}

/// Failure reported by a single module invocation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ModuleError(pub String);

impl ModuleError {
    /// Creates a module error from any message.
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}
