//! Random source contract for dice rolls and value ranges.
//!
//! The engine never owns an entropy source of its own. Embedders plug in a
//! [`RandomSource`]; the same seed must always yield the same sequence so
//! encounters can be replayed and tested.

use std::collections::VecDeque;

/// Uniform random values consumed by the resolver and the turn scheduler.
pub trait RandomSource: Send + Sync {
    /// Uniform integer in `[min, max]` inclusive. Returns `min` if `min >= max`.
    fn uniform_int(&mut self, min: u32, max: u32) -> u32;

    /// Uniform real in `[min, max]`. Returns `min` if the range is empty.
    fn uniform_f64(&mut self, min: f64, max: f64) -> f64;

    /// Roll a die with N sides (1-N inclusive).
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.uniform_int(1, sides.max(1))
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn uniform_int(&mut self, min: u32, max: u32) -> u32 {
        (**self).uniform_int(min, max)
    }

    fn uniform_f64(&mut self, min: f64, max: f64) -> f64 {
        (**self).uniform_f64(min, max)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR variant: 32-bit output from 64-bit state. Deterministic, fast,
/// and free of external dependencies, which makes it the default source for
/// tests and headless simulation.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug)]
pub struct PcgRandom {
    state: u64,
}

impl PcgRandom {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a generator whose sequence is fully determined by `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            state: Self::pcg_step(seed),
        }
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Generate the next raw 32-bit value.
    pub fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = Self::pcg_step(old);
        Self::pcg_output(old)
    }
}

impl RandomSource for PcgRandom {
    fn uniform_int(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = u64::from(max - min) + 1;
        min + (u64::from(self.next_u32()) % range) as u32
    }

    fn uniform_f64(&mut self, min: f64, max: f64) -> f64 {
        if !(max > min) {
            return min;
        }
        let unit = f64::from(self.next_u32()) / f64::from(u32::MAX);
        min + unit * (max - min)
    }
}

/// Random source that replays queued values, for pinning rolls in tests.
///
/// Queued values are clamped into the requested range. An exhausted queue
/// falls back to the range minimum.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRandom {
    ints: VecDeque<u32>,
    reals: VecDeque<f64>,
}

impl ScriptedRandom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue integer results (die rolls) in draw order.
    pub fn with_ints(mut self, values: impl IntoIterator<Item = u32>) -> Self {
        self.ints.extend(values);
        self
    }

    /// Queue real results (damage / heal draws) in draw order.
    pub fn with_reals(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.reals.extend(values);
        self
    }

    pub fn push_int(&mut self, value: u32) {
        self.ints.push_back(value);
    }

    pub fn push_real(&mut self, value: f64) {
        self.reals.push_back(value);
    }

    /// Number of integer draws still queued.
    pub fn remaining_ints(&self) -> usize {
        self.ints.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform_int(&mut self, min: u32, max: u32) -> u32 {
        let upper = max.max(min);
        self.ints
            .pop_front()
            .map_or(min, |value| value.clamp(min, upper))
    }

    fn uniform_f64(&mut self, min: f64, max: f64) -> f64 {
        let upper = if max > min { max } else { min };
        self.reals
            .pop_front()
            .map_or(min, |value| value.clamp(min, upper))
    }
}
