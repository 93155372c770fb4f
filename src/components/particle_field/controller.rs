//! Frame-rate driven population cap.

use log::debug;

use super::field::ParticleField;
use super::random::RandomSource;

/// Nudges the particle cap to hold the frame rate inside a target band.
///
/// The gap between `low_fps` and `high_fps` is a dead zone where the cap is
/// left alone, so the cap doesn't oscillate around a single threshold.
#[derive(Clone, Debug)]
pub struct AdaptiveController {
	/// Below this the cap shrinks.
	pub low_fps: f64,
	/// Above this the cap grows.
	pub high_fps: f64,
	/// Cap change per adjustment.
	pub step: usize,
	/// The cap never shrinks below this.
	pub min_cap: usize,
	/// The cap never grows past this.
	pub max_cap: usize,
}

impl Default for AdaptiveController {
	fn default() -> Self {
		Self {
			low_fps: 50.0,
			high_fps: 60.0,
			step: 50,
			min_cap: 100,
			max_cap: 2000,
		}
	}
}

impl AdaptiveController {
	/// Adjusts the field's cap for the measured frame rate. `0` means not yet measured.
	pub fn adjust<R: RandomSource>(&self, measured_fps: f64, field: &mut ParticleField<R>) {
		if measured_fps == 0.0 {
			return;
		}

		let cap = field.max_particles();
		let next = if measured_fps < self.low_fps && cap > self.min_cap {
			cap.saturating_sub(self.step).max(self.min_cap)
		} else if measured_fps > self.high_fps && cap < self.max_cap {
			(cap + self.step).min(self.max_cap)
		} else {
			return;
		};

		debug!("fps {:.1}: particle cap {} -> {}", measured_fps, cap, next);
		field.set_max_particles(next);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::particle_field::field::{FieldParams, ParameterUpdate};
	use crate::components::particle_field::random::RngSource;

	fn field(max: usize) -> ParticleField {
		ParticleField::with_rng(
			100.0,
			100.0,
			FieldParams {
				max_particles: max,
				..FieldParams::default()
			},
			RngSource::seeded(1),
		)
	}

	#[test]
	fn unmeasured_fps_is_ignored() {
		let mut f = field(500);
		AdaptiveController::default().adjust(0.0, &mut f);
		assert_eq!(f.max_particles(), 500);
	}

	#[test]
	fn dead_zone_leaves_cap_alone() {
		let ctl = AdaptiveController::default();
		let mut f = field(500);
		for fps in [50.0, 55.0, 60.0] {
			ctl.adjust(fps, &mut f);
			assert_eq!(f.max_particles(), 500, "fps {fps}");
		}
	}

	#[test]
	fn slow_frames_shrink_cap() {
		let mut f = field(500);
		AdaptiveController::default().adjust(49.9, &mut f);
		assert_eq!(f.max_particles(), 450);
	}

	#[test]
	fn fast_frames_grow_cap() {
		let mut f = field(500);
		AdaptiveController::default().adjust(60.1, &mut f);
		assert_eq!(f.max_particles(), 550);
	}

	#[test]
	fn cap_never_drops_below_floor() {
		let ctl = AdaptiveController::default();
		let mut f = field(520);
		for _ in 0..50 {
			ctl.adjust(10.0, &mut f);
			assert!(f.max_particles() >= 100);
		}
		assert_eq!(f.max_particles(), 100);
	}

	#[test]
	fn cap_never_exceeds_ceiling() {
		let ctl = AdaptiveController::default();
		let mut f = field(1990);
		for _ in 0..50 {
			ctl.adjust(200.0, &mut f);
			assert!(f.max_particles() <= 2000);
		}
		assert_eq!(f.max_particles(), 2000);
	}

	#[test]
	fn caps_below_floor_are_not_shrunk() {
		let mut f = field(500);
		f.set_parameters(ParameterUpdate {
			max_particles: Some(40),
			..Default::default()
		});
		AdaptiveController::default().adjust(10.0, &mut f);
		assert_eq!(f.max_particles(), 40);
	}
}
