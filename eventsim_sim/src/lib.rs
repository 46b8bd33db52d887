//! eventsim Harness
//!
//! Everything around the engine that a command-line run needs:
//! - **config**: the `key = value` configuration file format
//! - **runner**: loads a configuration, initializes and runs a [`Simulation`]
//! - **exporter**: JSON summary of a run for CI and offline inspection
//!
//! # Configuration file
//!
//! ```text
//! number_of_events = 1000
//! number_of_threads = 4
//! initial_seed = 42
//! modules = Module1 Module3 Module2
//! ```
//!
//! # Usage
//!
//! ```
//! use eventsim_sim::{parse_config, SimulationRunner};
//!
//! let config = parse_config("number_of_events = 3\nmodules = Module1\ninitial_seed = 42").unwrap();
//! let summary = SimulationRunner::new(config).with_workers(Some(2)).execute().unwrap();
//! assert_eq!(summary.outputs().len(), 3);
//! ```
//!
//! [`Simulation`]: eventsim_core::Simulation

pub mod config;
mod exporter;
mod runner;

pub use config::{load_config, parse_config, ConfigError};
pub use exporter::{EventRecord, RunExport};
pub use runner::{RunSummary, SimulationRunner};
