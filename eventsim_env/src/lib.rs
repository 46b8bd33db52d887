//! eventsim Environment Layer
//!
//! This crate holds the vocabulary shared by the engine and the harness:
//! - `Event`: one simulation trial and the seed assigned to it
//! - `SeedStream`: the single top-level generator that hands out per-event seeds
//! - The error taxonomy for initialization, submission and task execution
//!
//! # Determinism
//!
//! Every bit of entropy in a run is derived from one initial seed. Seeds are
//! drawn in event order by a single producer, so the seed for event `n` never
//! depends on how many workers later execute the events.
//!
//! # Example
//!
//! ```
//! use eventsim_env::{Event, SeedStream};
//!
//! let mut seeds = SeedStream::new(42);
//! let first = Event::new(1, seeds.next_seed());
//! let second = Event::new(2, seeds.next_seed());
//! assert_ne!(first.seed(), second.seed());
//! ```

mod error;
mod seeds;
mod types;

pub use error::{ModuleError, SimError, TaskError};
pub use seeds::SeedStream;
pub use types::Event;
