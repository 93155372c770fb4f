//! A single fading, bouncing point of light.

use super::random::RandomSource;
use super::render::Surface;
use super::theme::Color;

/// Spawn area as a fraction of the bounds, per axis.
const SPAWN_MARGIN: f64 = 0.1;
/// Velocity kept after bouncing off an edge.
const BOUNCE_DAMPING: f64 = 0.98;
/// Scales the fade ramp relative to `255 / fade_time`.
const FADE_RATE_SCALE: f64 = 50.0;
/// Particles at or below this alpha are culled even with life left.
const CULL_ALPHA: f64 = 5.0;
const SIZE_MIN: f64 = 2.0;
const SIZE_MAX: f64 = 4.0;

/// `(min, max)` pair drawn from uniformly.
pub type Range = (f64, f64);

/// A single simulated particle.
#[derive(Clone, Debug)]
pub struct Particle {
	/// Horizontal position in pixels.
	pub x: f64,
	/// Vertical position in pixels.
	pub y: f64,
	/// Horizontal velocity in pixels per second.
	pub vx: f64,
	/// Vertical velocity in pixels per second.
	pub vy: f64,
	/// Lifetime drawn at spawn, in seconds.
	pub max_life: f64,
	/// Seconds remaining, counts down from `max_life`.
	pub life: f64,
	/// Length of the fade-in window in seconds.
	pub fade_time: f64,
	/// Alpha units per second while ramping.
	pub fade_speed: f64,
	/// Opacity in `[0, 255]`.
	pub alpha: f64,
	/// Radius in pixels at full opacity.
	pub size: f64,
	bounds: (f64, f64),
}

impl Particle {
	/// Spawns a particle somewhere in the central 80% of `bounds`.
	pub fn new(
		bounds: (f64, f64),
		speed_range: Range,
		life_range: Range,
		fade_range: Range,
		rng: &mut impl RandomSource,
	) -> Self {
		let (w, h) = bounds;
		let x = rng.uniform(SPAWN_MARGIN * w, (1.0 - SPAWN_MARGIN) * w);
		let y = rng.uniform(SPAWN_MARGIN * h, (1.0 - SPAWN_MARGIN) * h);

		let angle = rng.angle();
		let speed = rng.uniform(speed_range.0, speed_range.1);

		let max_life = rng.uniform(life_range.0, life_range.1);
		let fade_time = rng.uniform(fade_range.0, fade_range.1);

		Self {
			x,
			y,
			vx: angle.cos() * speed,
			vy: angle.sin() * speed,
			max_life,
			life: max_life,
			fade_time,
			fade_speed: 255.0 / fade_time,
			alpha: 0.0,
			size: rng.uniform(SIZE_MIN, SIZE_MAX),
			bounds,
		}
	}

	/// Advances the particle by `dt` seconds. Returns whether it is still alive.
	pub fn update(&mut self, dt: f64) -> bool {
		self.x += self.vx * dt;
		self.y += self.vy * dt;
		self.life = (self.life - dt).max(0.0);

		let (w, h) = self.bounds;
		if self.x < 0.0 || self.x > w {
			self.vx *= -BOUNCE_DAMPING;
			self.x = self.x.min(w - 1.0).max(1.0);
		}
		if self.y < 0.0 || self.y > h {
			self.vy *= -BOUNCE_DAMPING;
			self.y = self.y.min(h - 1.0).max(1.0);
		}

		// Fades in during the first `fade_time` seconds, then decays for the
		// rest of its life.
		let step = self.fade_speed * dt * FADE_RATE_SCALE;
		self.alpha = if self.life > self.max_life - self.fade_time {
			(self.alpha + step).min(255.0)
		} else {
			(self.alpha - step).max(0.0)
		};

		self.is_alive()
	}

	/// Alive while life remains and the particle is still visible.
	pub fn is_alive(&self) -> bool {
		self.life > 0.0 && self.alpha > CULL_ALPHA
	}

	/// Radius shrinks with opacity, never below one pixel.
	pub fn radius(&self) -> i32 {
		((self.size * self.alpha / 255.0).round() as i32).max(1)
	}

	/// Draws a filled circle at the rounded position.
	pub fn render(&self, target: &impl Surface, color: Color) {
		target.fill_circle(
			self.x.round() as i32,
			self.y.round() as i32,
			self.radius(),
			color.with_alpha_byte(self.alpha.round() as u8),
		);
	}

	pub(super) fn set_bounds(&mut self, bounds: (f64, f64)) {
		self.bounds = bounds;
	}
}
