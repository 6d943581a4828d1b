//! Injectable random sources for the launch angle

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniformly distributed launch values
pub trait RandomSource {
    /// Sample within `[min, max]`; returns `min` when the range is empty
    ///
    /// Implementations may or may not reach `max` itself. `SeededRandom`
    /// never does; `ScriptedRandom` clamps and so can.
    fn uniform(&mut self, min: f32, max: f32) -> f32;
}

/// Seeded PCG generator, reproducible for a given seed
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: Pcg32,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..max)
    }
}

/// Replays a fixed list of values, cycling, clamped into `[min, max]`
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Always returns `value`
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        if max <= min || self.values.is_empty() {
            return min;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        value.clamp(min, max)
    }
}
