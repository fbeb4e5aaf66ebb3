// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Random sources for progress increments
//!
//! Each tick of a processing stage adds an increment drawn uniformly from
//! `[0, max)`. The source is injected so tests can pin the exact sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplies per-tick progress increments
pub trait Entropy: Send {
    /// Next increment in `[0, max)`
    fn increment(&mut self, max: f64) -> f64;
}

/// Process-wide thread RNG
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadEntropy;

impl Entropy for ThreadEntropy {
    fn increment(&mut self, max: f64) -> f64 {
        rand::random::<f64>() * max
    }
}

/// Reproducible RNG seeded from a `u64`
#[derive(Clone, Debug)]
pub struct SeededEntropy {
    rng: StdRng,
}

impl SeededEntropy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Entropy for SeededEntropy {
    fn increment(&mut self, max: f64) -> f64 {
        self.rng.gen::<f64>() * max
    }
}

/// Replays a fixed list of increments, cycling when exhausted
///
/// Values are clamped into `[0, max]`. An empty list yields `max` every time.
#[derive(Clone, Debug)]
pub struct FixedEntropy {
    values: Vec<f64>,
    cursor: usize,
}

impl FixedEntropy {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
            cursor: 0,
        }
    }

    /// Always returns `value`
    pub fn constant(value: f64) -> Self {
        Self::new([value])
    }
}

impl Entropy for FixedEntropy {
    fn increment(&mut self, max: f64) -> f64 {
        let Some(value) = self.values.get(self.cursor % self.values.len().max(1)) else {
            return max;
        };
        self.cursor += 1;
        value.clamp(0.0, max)
    }
}

impl<E: Entropy + ?Sized> Entropy for Box<E> {
    fn increment(&mut self, max: f64) -> f64 {
        (**self).increment(max)
    }
}
