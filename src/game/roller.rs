use rand::{rngs::StdRng, Rng, SeedableRng};

use super::types::DiceError;

pub trait Roller {
    fn roll_in_range(&mut self, max: u32) -> u32;

    /// Rolls `count` dice of `sides` sides, each in `1..=sides`.
    fn roll(&mut self, count: u32, sides: u32) -> Result<Vec<u32>, DiceError> {
        if count == 0 || sides < 2 {
            return Err(DiceError::InvalidArgument { count, sides });
        }
        Ok((0..count).map(|_| self.roll_in_range(sides)).collect())
    }
}

pub struct ThreadRngRoller {
    rng: rand::rngs::ThreadRng,
}

impl ThreadRngRoller {
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for ThreadRngRoller {
    fn default() -> Self {
        Self::new()
    }
}

impl Roller for ThreadRngRoller {
    fn roll_in_range(&mut self, max: u32) -> u32 {
        self.rng.random_range(1..=max)
    }
}

/// Reproducible roller for tests and replays.
pub struct SeededRoller {
    rng: StdRng,
}

impl SeededRoller {
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Roller for SeededRoller {
    fn roll_in_range(&mut self, max: u32) -> u32 {
        self.rng.random_range(1..=max)
    }
}
