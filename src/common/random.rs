//! Draw code sources
//!
//! Algorithms never call the RNG directly; they take a [`RandomSource`] so
//! production draws use the OS CSPRNG while tests replay fixed sequences.

use rand::rngs::OsRng;
use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Source of uniform draw codes
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource: Send + Sync {
    /// Uniform integer in `[1, bound]`
    fn next_code(&self, bound: u32) -> u32;
}

/// Cryptographically secure source backed by the operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn next_code(&self, bound: u32) -> u32 {
        OsRng.gen_range(1..=bound.max(1))
    }
}

/// Replays a fixed sequence of codes, cycling when exhausted
///
/// Values are clamped into `[1, bound]`.
#[derive(Debug)]
pub struct FixedRandom {
    values: Vec<u32>,
    index: AtomicUsize,
}

impl FixedRandom {
    pub fn new(values: Vec<u32>) -> Self {
        Self {
            values,
            index: AtomicUsize::new(0),
        }
    }

    /// Always returns the same code
    pub fn constant(value: u32) -> Self {
        Self::new(vec![value])
    }

    /// Number of codes handed out so far
    pub fn calls(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }
}

impl RandomSource for FixedRandom {
    fn next_code(&self, bound: u32) -> u32 {
        let idx = self.index.fetch_add(1, Ordering::SeqCst);
        match self.values.get(idx % self.values.len().max(1)) {
            Some(value) => (*value).clamp(1, bound.max(1)),
            None => 1,
        }
    }
}
