//! Per-frame simulation state driven by the animation loop.
//!
//! Each accepted frame runs, in order: clock tick, keyboard controls, cap
//! adjustment, then the field tick. Nothing here touches the DOM, so the
//! whole sequence can be exercised natively.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::clock::FrameClock;
use super::config::FieldConfig;
use super::controller::AdaptiveController;
use super::field::{FieldParams, ParticleField};
use super::input::{Controls, KeyState};
use super::particle::Range;
use super::random::{RandomSource, RngSource};

/// Snapshot shown by the stats overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameStats {
	/// Measured frame rate, `0.0` until known.
	pub fps: f64,
	/// Live particle count.
	pub particles: usize,
	/// Current spawn speed range.
	pub speed_range: Range,
	/// Current population cap.
	pub max_particles: usize,
}

/// Shared flag that ends the animation loop between frames.
///
/// Cloning shares the flag, so the component's cleanup handler can stop a
/// loop it doesn't own.
#[derive(Clone, Debug, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
	/// Requests shutdown; takes effect at the next frame.
	pub fn stop(&self) {
		self.0.store(true, Ordering::Relaxed);
	}

	/// Whether shutdown was requested.
	pub fn is_stopped(&self) -> bool {
		self.0.load(Ordering::Relaxed)
	}
}

/// Bundles the field with the clock, controller and input it reacts to.
pub struct FieldState<R = RngSource> {
	/// The simulated particles.
	pub field: ParticleField<R>,
	/// Adjusts the cap from the measured frame rate.
	pub controller: AdaptiveController,
	/// Frame timing and pacing.
	pub clock: FrameClock,
	/// Keyboard state fed by window events.
	pub keys: KeyState,
	/// Key bindings applied each frame.
	pub controls: Controls,
	/// Whether the stats overlay is drawn.
	pub show_stats: bool,
	/// Checked before every frame.
	pub stop: StopSignal,
}

impl FieldState {
	/// State seeded from `config` with an entropy-seeded generator.
	pub fn new(config: &FieldConfig, width: f64, height: f64) -> Self {
		Self::with_rng(config, width, height, RngSource::from_entropy())
	}
}

impl<R: RandomSource> FieldState<R> {
	/// State seeded from `config`, drawing randomness from `rng`.
	pub fn with_rng(config: &FieldConfig, width: f64, height: f64, rng: R) -> Self {
		let params = FieldParams {
			speed_range: config.speed_range,
			life_range: config.life_range,
			fade_range: config.fade_range,
			max_particles: config.max_particles,
		};
		Self {
			field: ParticleField::with_rng(width, height, params, rng),
			controller: AdaptiveController::default(),
			clock: FrameClock::new(config.target_fps),
			keys: KeyState::default(),
			controls: Controls::default(),
			show_stats: config.show_stats,
			stop: StopSignal::default(),
		}
	}

	/// Runs one frame at timestamp `now` (ms). Returns `None` when pacing
	/// skips it or the loop has been stopped.
	pub fn advance(&mut self, now: f64) -> Option<FrameStats> {
		if self.stop.is_stopped() || !self.clock.ready(now) {
			return None;
		}
		let dt = self.clock.tick(now);
		let fps = self.clock.fps();

		self.controls
			.apply(&mut self.keys, &mut self.field, &mut self.show_stats);
		self.controller.adjust(fps, &mut self.field);
		self.field.tick(dt, self.clock.elapsed_ms(now));

		Some(self.stats(fps))
	}

	/// Overlay snapshot for the current field.
	pub fn stats(&self, fps: f64) -> FrameStats {
		FrameStats {
			fps,
			particles: self.field.len(),
			speed_range: self.field.speed_range(),
			max_particles: self.field.max_particles(),
		}
	}

	/// Follows a canvas resize.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.field.resize(width, height);
	}
}
