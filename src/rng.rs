use std::time::{SystemTime, UNIX_EPOCH};

use rand::RngExt;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Source of 32-bit random words for tile colors.
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;
}

impl RandomSource for StdRng {
    fn next_u32(&mut self) -> u32 {
        self.random::<u32>()
    }
}

/// Create a deterministic StdRng from a u64 seed.
/// This is the ONLY way to create an RNG in the crate; a session with a
/// logged seed can always be replayed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Per-process seed taken from the wall clock.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
