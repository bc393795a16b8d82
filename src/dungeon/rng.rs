//! Randomness source for spawning and combat.
//!
//! Every random decision the engine makes goes through [`Dice`], so a test can
//! replace the generator with [`ScriptedDice`] and replay an exact sequence.

use std::collections::VecDeque;

use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait Dice {
    /// Uniform integer in `lo..=hi`.
    fn uniform_int(&mut self, lo: i32, hi: i32) -> i32;

    /// True with probability `p`.
    fn chance(&mut self, p: f64) -> bool;

    /// Uniform index into a table of `len` entries.
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let hi = i32::try_from(len - 1).unwrap_or(i32::MAX);
        usize::try_from(self.uniform_int(0, hi)).unwrap_or(0).min(len - 1)
    }
}

/// Production dice backed by `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: StdRng,
}

impl SeededDice {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when `seed` is set, otherwise from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::from_seed(s),
            None => Self::from_entropy(),
        }
    }
}

impl Dice for SeededDice {
    fn uniform_int(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    fn chance(&mut self, p: f64) -> bool {
        if p <= 0.0 {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        // Same comparison as `random() < p`.
        self.rng.gen::<f64>() < p
    }
}

/// Replays queued draws in order. An exhausted queue yields `lo` or `false`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    ints: VecDeque<i32>,
    chances: VecDeque<bool>,
}

impl ScriptedDice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ints(mut self, ints: impl IntoIterator<Item = i32>) -> Self {
        self.ints.extend(ints);
        self
    }

    pub fn with_chances(mut self, chances: impl IntoIterator<Item = bool>) -> Self {
        self.chances.extend(chances);
        self
    }

    pub fn push_int(&mut self, value: i32) {
        self.ints.push_back(value);
    }

    pub fn push_chance(&mut self, value: bool) {
        self.chances.push_back(value);
    }

    /// Draws not consumed yet, as (ints, chances).
    pub fn remaining(&self) -> (usize, usize) {
        (self.ints.len(), self.chances.len())
    }
}

impl Dice for ScriptedDice {
    fn uniform_int(&mut self, lo: i32, hi: i32) -> i32 {
        let value = self.ints.pop_front().unwrap_or(lo);
        trace!("scripted int {} in {}..={}", value, lo, hi);
        value
    }

    fn chance(&mut self, p: f64) -> bool {
        let value = self.chances.pop_front().unwrap_or(false);
        trace!("scripted chance {} at p={}", value, p);
        value
    }
}
