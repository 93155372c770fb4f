//! Uniform random source used when spawning particles.
//!
//! Spawning draws every value through [`RandomSource`] so tests can swap in a
//! seeded generator or a scripted sequence.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed floats.
pub trait RandomSource {
	/// Uniform value between `min` and `max`. A reversed range is allowed.
	fn uniform(&mut self, min: f64, max: f64) -> f64;

	/// Uniform angle in `[0, 2π)`.
	fn angle(&mut self) -> f64 {
		self.uniform(0.0, TAU)
	}
}

/// Adapts any `rand` generator into a [`RandomSource`].
#[derive(Clone, Debug)]
pub struct RngSource<R = StdRng>(
	/// Wrapped generator.
	pub R,
);

impl RngSource<StdRng> {
	/// Generator seeded from system entropy.
	pub fn from_entropy() -> Self {
		Self(StdRng::from_entropy())
	}

	/// Deterministic generator for reproducible runs.
	pub fn seeded(seed: u64) -> Self {
		Self(StdRng::seed_from_u64(seed))
	}
}

impl<R: Rng> RandomSource for RngSource<R> {
	fn uniform(&mut self, min: f64, max: f64) -> f64 {
		// Linear interpolation keeps `min > max` and `min == max` well defined,
		// unlike `gen_range` which panics on an empty range.
		let t: f64 = self.0.r#gen();
		min + (max - min) * t
	}
}
