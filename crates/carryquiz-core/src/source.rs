//! Sources of randomness for the problem generator.
//!
//! The generator only needs two things: a fair coin for mixed sessions and a
//! uniform draw from an inclusive range. [`NumberSource`] is implemented for
//! every [`rand::Rng`], so a seeded `StdRng` gives reproducible batches, and
//! [`ScriptedSource`] replays fixed values for tests.

use rand::Rng;

/// Random draws the generator consumes.
pub trait NumberSource {
    /// Fair coin flip.
    fn coin_flip(&mut self) -> bool;

    /// Uniform draw from `low..=high`.
    fn draw(&mut self, low: u64, high: u64) -> u64;
}

impl<R: Rng + ?Sized> NumberSource for R {
    fn coin_flip(&mut self) -> bool {
        self.gen_bool(0.5)
    }

    fn draw(&mut self, low: u64, high: u64) -> u64 {
        self.gen_range(low..=high)
    }
}

/// A number source that replays a fixed script.
///
/// Numbers and coin flips each cycle through their script once exhausted, so
/// `ScriptedSource::new(vec![50, 50])` yields 50 forever. Drawn numbers are
/// clamped into the requested range.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    numbers: Vec<u64>,
    flips: Vec<bool>,
    next_number: usize,
    next_flip: usize,
    draws: usize,
}

impl ScriptedSource {
    /// Replay `numbers`; coin flips always come up `true`.
    pub fn new(numbers: Vec<u64>) -> Self {
        Self::with_flips(numbers, vec![true])
    }

    /// Replay `numbers` and `flips`.
    pub fn with_flips(numbers: Vec<u64>, flips: Vec<bool>) -> Self {
        Self {
            numbers,
            flips,
            next_number: 0,
            next_flip: 0,
            draws: 0,
        }
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl NumberSource for ScriptedSource {
    fn coin_flip(&mut self) -> bool {
        if self.flips.is_empty() {
            return true;
        }
        let flip = self.flips[self.next_flip % self.flips.len()];
        self.next_flip += 1;
        flip
    }

    fn draw(&mut self, low: u64, high: u64) -> u64 {
        self.draws += 1;
        if self.numbers.is_empty() {
            return low;
        }
        let value = self.numbers[self.next_number % self.numbers.len()];
        self.next_number += 1;
        value.clamp(low, high)
    }
}
