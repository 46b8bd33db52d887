//! The seed stream that hands out per-event seeds.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::{SystemTime, UNIX_EPOCH};

/// Deterministic source of per-event seeds.
///
/// Owned by exactly one producer (the orchestrator). Each call to
/// [`SeedStream::next_seed`] advances a seeded ChaCha8 generator, so the
/// n-th seed is a pure function of the initial seed and `n`.
///
/// Seeds are 32-bit values widened to `u64`, which keeps them printable and
/// identical to what a 32-bit configuration file can express.
pub struct SeedStream {
    /// Seed the stream was created with
    initial: u64,

    /// Generator advanced once per draw
    rng: ChaCha8Rng,

    /// Number of seeds handed out so far
    drawn: u64,
}

impl SeedStream {
    /// Creates a stream from an explicit initial seed.
    pub fn new(initial: u64) -> Self {
        Self {
            initial,
            rng: ChaCha8Rng::seed_from_u64(initial),
            drawn: 0,
        }
    }

    /// Creates a stream whose initial seed is taken from the wall clock.
    ///
    /// Used when no seed was configured. The run is still reproducible once
    /// the chosen seed (see [`SeedStream::initial`]) is known.
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::new(nanos)
    }

    /// Draws the next seed.
    pub fn next_seed(&mut self) -> u64 {
        self.drawn += 1;
        u64::from(self.rng.next_u32())
    }

    /// Returns the seed the stream was created with.
    pub fn initial(&self) -> u64 {
        self.initial
    }

    /// Returns how many seeds were drawn.
    pub fn drawn(&self) -> u64 {
        self.drawn
    }
}

impl std::fmt::Debug for SeedStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedStream")
            .field("initial", &self.initial)
            .field("drawn", &self.drawn)
            .finish()
    }
}
