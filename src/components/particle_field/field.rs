//! Particle population: spawning, culling and periodic flushes.

use log::debug;

use super::particle::{Particle, Range};
use super::random::{RandomSource, RngSource};
use super::render::Surface;
use super::theme::Color;

/// Most particles spawned in a single tick.
pub const SPAWN_PER_TICK: usize = 5;
/// Every particle is dropped once this much time passes since the last flush.
pub const FLUSH_INTERVAL_MS: f64 = 30_000.0;
/// Lowest cap `set_parameters` accepts.
pub const MIN_PARTICLES: usize = 10;
const MIN_SPEED: f64 = 0.0;
const MIN_LIFE: f64 = 0.1;
const MIN_FADE: f64 = 0.1;

/// Starting parameters for a new field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldParams {
	/// Spawn speed in pixels per second.
	pub speed_range: Range,
	/// Particle lifetime in seconds.
	pub life_range: Range,
	/// Fade-in duration in seconds.
	pub fade_range: Range,
	/// Population cap.
	pub max_particles: usize,
}

impl Default for FieldParams {
	fn default() -> Self {
		Self {
			speed_range: (50.0, 150.0),
			life_range: (1.5, 3.0),
			fade_range: (0.8, 1.5),
			max_particles: 500,
		}
	}
}

/// Partial parameter change. `None` leaves the current value in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterUpdate {
	/// New speed range, floored at 0.
	pub speed: Option<Range>,
	/// New lifetime range, floored at 0.1 s.
	pub life: Option<Range>,
	/// New fade range, floored at 0.1 s.
	pub fade: Option<Range>,
	/// New cap, floored at [`MIN_PARTICLES`].
	pub max_particles: Option<usize>,
}

fn floor_range((min, max): Range, floor: f64) -> Range {
	(min.max(floor), max.max(floor))
}

/// Owns the live particles and keeps their population near the cap.
pub struct ParticleField<R = RngSource> {
	particles: Vec<Particle>,
	bounds: (f64, f64),
	speed_range: Range,
	life_range: Range,
	fade_range: Range,
	max_particles: usize,
	last_flush: f64,
	rng: R,
}

impl ParticleField {
	/// Field with default parameters and an entropy-seeded generator.
	pub fn new(width: f64, height: f64) -> Self {
		Self::with_rng(width, height, FieldParams::default(), RngSource::from_entropy())
	}
}

impl<R: RandomSource> ParticleField<R> {
	/// Field drawing its randomness from `rng`.
	pub fn with_rng(width: f64, height: f64, params: FieldParams, rng: R) -> Self {
		let mut field = Self {
			particles: Vec::with_capacity(params.max_particles),
			bounds: (width, height),
			speed_range: params.speed_range,
			life_range: params.life_range,
			fade_range: params.fade_range,
			max_particles: params.max_particles,
			last_flush: 0.0,
			rng,
		};
		// Route through the clamping path so the floors hold from the start.
		field.set_parameters(ParameterUpdate {
			speed: Some(params.speed_range),
			life: Some(params.life_range),
			fade: Some(params.fade_range),
			max_particles: Some(params.max_particles),
		});
		field
	}

	/// Applies any provided values, raising them to their floors.
	pub fn set_parameters(&mut self, update: ParameterUpdate) {
		if let Some(speed) = update.speed {
			self.speed_range = floor_range(speed, MIN_SPEED);
		}
		if let Some(life) = update.life {
			self.life_range = floor_range(life, MIN_LIFE);
		}
		if let Some(fade) = update.fade {
			self.fade_range = floor_range(fade, MIN_FADE);
		}
		if let Some(max) = update.max_particles {
			self.max_particles = max.max(MIN_PARTICLES);
		}
	}

	/// Advances the simulation one frame.
	///
	/// `dt` is in seconds, `now` is a monotonic timestamp in milliseconds.
	pub fn tick(&mut self, dt: f64, now: f64) {
		let live = self.particles.len();
		if live < self.max_particles {
			let to_add = SPAWN_PER_TICK.min(self.max_particles - live);
			for _ in 0..to_add {
				let p = Particle::new(
					self.bounds,
					self.speed_range,
					self.life_range,
					self.fade_range,
					&mut self.rng,
				);
				self.particles.push(p);
			}
		}

		self.particles.retain_mut(|p| p.update(dt));

		if now - self.last_flush > FLUSH_INTERVAL_MS {
			debug!("flushing {} particles", self.particles.len());
			self.particles.clear();
			self.last_flush = now;
		}
	}

	/// Draws every live particle. Draw order is irrelevant.
	pub fn render_all(&self, target: &impl Surface, color: Color) {
		for p in &self.particles {
			p.render(target, color);
		}
	}

	/// Changes the bounds for live and future particles.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.bounds = (width, height);
		for p in &mut self.particles {
			p.set_bounds(self.bounds);
		}
	}

	/// Number of live particles.
	pub fn len(&self) -> usize {
		self.particles.len()
	}

	/// Whether no particles are alive.
	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Live particles, in no particular order.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Width and height in pixels.
	pub fn bounds(&self) -> (f64, f64) {
		self.bounds
	}

	/// Current spawn speed range.
	pub fn speed_range(&self) -> Range {
		self.speed_range
	}

	/// Current lifetime range.
	pub fn life_range(&self) -> Range {
		self.life_range
	}

	/// Current fade range.
	pub fn fade_range(&self) -> Range {
		self.fade_range
	}

	/// Current population cap.
	pub fn max_particles(&self) -> usize {
		self.max_particles
	}

	/// Sets the cap directly, bypassing the parameter floor.
	pub(super) fn set_max_particles(&mut self, max: usize) {
		self.max_particles = max;
	}

	/// Timestamp of the most recent flush, in milliseconds.
	pub fn last_flush(&self) -> f64 {
		self.last_flush
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::particle_field::particle::tests::Recorder;

	fn field(max: usize) -> ParticleField {
		ParticleField::with_rng(
			100.0,
			100.0,
			FieldParams {
				max_particles: max,
				..FieldParams::default()
			},
			RngSource::seeded(5),
		)
	}

	#[test]
	fn spawns_at_most_five_per_tick() {
		let mut f = field(10);
		f.set_parameters(ParameterUpdate {
			max_particles: Some(500),
			..Default::default()
		});
		f.tick(0.016, 0.0);
		assert_eq!(f.len(), 5);
	}

	#[test]
	fn spawn_count_limited_by_remaining_room() {
		let mut f = field(12);
		for _ in 0..2 {
			f.tick(0.001, 0.0);
		}
		assert_eq!(f.len(), 10);
		f.tick(0.001, 0.0);
		assert_eq!(f.len(), 12);
		f.tick(0.001, 0.0);
		assert_eq!(f.len(), 12);
	}

	#[test]
	fn dead_particles_are_dropped() {
		let mut f = field(100);
		f.tick(0.016, 0.0);
		assert_eq!(f.len(), 5);
		f.particles.iter_mut().for_each(|p| p.life = 0.001);
		f.max_particles = 5;
		f.tick(0.016, 0.0);
		assert!(f.is_empty());
	}

	#[test]
	fn flush_clears_everything_and_records_time() {
		let mut f = field(500);
		for _ in 0..20 {
			f.tick(0.016, 1_000.0);
		}
		assert!(!f.is_empty());
		f.last_flush = 1_000.0;

		f.tick(0.016, 1_000.0 + 30_001.0);
		assert!(f.is_empty());
		assert_eq!(f.last_flush(), 31_001.0);
	}

	#[test]
	fn no_flush_at_exactly_thirty_seconds() {
		let mut f = field(500);
		f.tick(0.016, FLUSH_INTERVAL_MS);
		assert_eq!(f.len(), 5);
		assert_eq!(f.last_flush(), 0.0);
	}

	#[test]
	fn parameters_are_floored() {
		let mut f = field(500);
		f.set_parameters(ParameterUpdate {
			speed: Some((-20.0, 5.0)),
			life: Some((0.0, 0.05)),
			fade: Some((-1.0, 2.0)),
			max_particles: Some(3),
		});
		assert_eq!(f.speed_range(), (0.0, 5.0));
		assert_eq!(f.life_range(), (0.1, 0.1));
		assert_eq!(f.fade_range(), (0.1, 2.0));
		assert_eq!(f.max_particles(), MIN_PARTICLES);
	}

	#[test]
	fn absent_parameters_are_untouched() {
		let mut f = field(500);
		f.set_parameters(ParameterUpdate {
			speed: Some((10.0, 20.0)),
			..Default::default()
		});
		assert_eq!(f.speed_range(), (10.0, 20.0));
		assert_eq!(f.life_range(), (1.5, 3.0));
		assert_eq!(f.fade_range(), (0.8, 1.5));
		assert_eq!(f.max_particles(), 500);
	}

	#[test]
	fn construction_applies_floors() {
		let f = ParticleField::with_rng(
			10.0,
			10.0,
			FieldParams {
				speed_range: (-1.0, -1.0),
				life_range: (0.0, 0.0),
				fade_range: (0.0, 0.0),
				max_particles: 0,
			},
			RngSource::seeded(0),
		);
		assert_eq!(f.speed_range(), (0.0, 0.0));
		assert_eq!(f.life_range(), (0.1, 0.1));
		assert_eq!(f.fade_range(), (0.1, 0.1));
		assert_eq!(f.max_particles(), 10);
	}

	#[test]
	fn render_all_draws_each_particle() {
		let mut f = field(500);
		f.tick(0.016, 0.0);
		let surface = Recorder::default();
		f.render_all(&surface, Color::rgb(255, 255, 255));
		assert_eq!(surface.0.borrow().len(), f.len());
	}

	#[test]
	fn resize_updates_live_particle_bounds() {
		let mut f = field(500);
		f.tick(0.016, 0.0);
		f.resize(20.0, 20.0);
		assert_eq!(f.bounds(), (20.0, 20.0));
		f.tick(0.5, 0.0);
		for p in f.particles() {
			assert!(p.x <= 20.0 && p.y <= 20.0, "({}, {})", p.x, p.y);
		}
	}
}
