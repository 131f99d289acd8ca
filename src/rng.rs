//! Seeded randomness threaded explicitly through generation and growth.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The simulation-wide random source. One instance per world, seeded from
/// the scenario, so terrain shape and growth rolls replay for a given seed.
pub type SimRng = ChaCha8Rng;

pub fn seeded(seed: u64) -> SimRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Helpers for the common probability draws.
pub trait RngExt {
    /// Uniform draw in `[0, 1)` strictly below `probability`.
    fn chance(&mut self, probability: f64) -> bool;
}

impl<R: Rng> RngExt for R {
    fn chance(&mut self, probability: f64) -> bool {
        self.gen::<f64>() < probability
    }
}
