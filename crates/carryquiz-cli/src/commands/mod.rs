//! Subcommand implementations.

use rand::rngs::StdRng;
use rand::SeedableRng;

pub mod generate;
pub mod grade;
pub mod init;
pub mod practice;

/// A seeded generator when a seed is given, otherwise one seeded from the OS.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
