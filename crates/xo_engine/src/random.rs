//! Uniform `[0, 1)` sources for the randomized difficulty tiers.

use rand::Rng;
use std::collections::VecDeque;

/// Source of uniform samples in `[0, 1)`.
pub trait RandomSource {
    /// Next sample in `[0, 1)`.
    fn next_f64(&mut self) -> f64;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Adapts any [`rand::Rng`] into a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<rand::rngs::ThreadRng> {
    /// Thread-local generator.
    pub fn thread() -> Self {
        Self(rand::rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_f64(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Always returns the same sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSource(pub f64);

impl RandomSource for FixedSource {
    fn next_f64(&mut self) -> f64 {
        self.0
    }
}

/// Replays a list of samples in order, cycling when exhausted.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceSource {
    samples: VecDeque<f64>,
}

impl SequenceSource {
    /// Creates a source replaying `samples`. An empty list yields `0.0`.
    pub fn new(samples: impl IntoIterator<Item = f64>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
        }
    }
}

impl RandomSource for SequenceSource {
    fn next_f64(&mut self) -> f64 {
        match self.samples.pop_front() {
            Some(sample) => {
                self.samples.push_back(sample);
                sample
            }
            None => 0.0,
        }
    }
}
