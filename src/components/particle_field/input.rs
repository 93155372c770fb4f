//! Keyboard state and the runtime tuning controls bound to it.

use std::collections::HashSet;

use log::debug;

use super::field::{ParameterUpdate, ParticleField};
use super::random::RandomSource;

/// Held keys plus presses not yet consumed.
///
/// Keys are identified by `KeyboardEvent.key` values (`"ArrowUp"`, `"s"`, ...).
#[derive(Clone, Debug, Default)]
pub struct KeyState {
	held: HashSet<String>,
	pressed: HashSet<String>,
}

impl KeyState {
	/// Records a `keydown`. Auto-repeat events do not count as new presses.
	pub fn key_down(&mut self, key: &str, repeat: bool) {
		let newly_held = self.held.insert(key.to_string());
		if newly_held && !repeat {
			self.pressed.insert(key.to_string());
		}
	}

	/// Records a `keyup`.
	pub fn key_up(&mut self, key: &str) {
		self.held.remove(key);
	}

	/// Whether `key` is currently held.
	pub fn is_down(&self, key: &str) -> bool {
		self.held.contains(key)
	}

	/// Consumes a pending press of `key`.
	pub fn take_pressed(&mut self, key: &str) -> bool {
		self.pressed.remove(key)
	}

	/// Forgets everything, e.g. when the window loses focus and `keyup`s go missing.
	pub fn clear(&mut self) {
		self.held.clear();
		self.pressed.clear();
	}
}

/// Key bindings for speed tuning and the stats overlay.
#[derive(Clone, Debug)]
pub struct Controls {
	/// Raise the speed range while held.
	pub speed_up: Vec<&'static str>,
	/// Lower the speed range while held.
	pub speed_down: Vec<&'static str>,
	/// Flip the stats overlay on press.
	pub toggle_stats: Vec<&'static str>,
	/// Speed change per frame while a speed key is held.
	pub speed_step: f64,
}

impl Default for Controls {
	fn default() -> Self {
		Self {
			speed_up: vec!["ArrowUp"],
			speed_down: vec!["ArrowDown"],
			toggle_stats: vec!["s", "S"],
			speed_step: 10.0,
		}
	}
}

impl Controls {
	/// Polls `keys` once for this frame, updating the field and overlay flag.
	pub fn apply<R: RandomSource>(
		&self,
		keys: &mut KeyState,
		field: &mut ParticleField<R>,
		show_stats: &mut bool,
	) {
		let (min, max) = field.speed_range();
		if self.speed_up.iter().any(|k| keys.is_down(k)) {
			let speed = (min + self.speed_step, max + self.speed_step);
			debug!("speed range -> {:?}", speed);
			field.set_parameters(ParameterUpdate {
				speed: Some(speed),
				..Default::default()
			});
		}

		let (min, max) = field.speed_range();
		if self.speed_down.iter().any(|k| keys.is_down(k)) {
			let speed = (
				(min - self.speed_step).max(0.0),
				(max - self.speed_step).max(0.0),
			);
			debug!("speed range -> {:?}", speed);
			field.set_parameters(ParameterUpdate {
				speed: Some(speed),
				..Default::default()
			});
		}

		// Evaluate every binding so stale presses of aliases are consumed too.
		let toggled = self
			.toggle_stats
			.iter()
			.fold(false, |any, k| keys.take_pressed(k) || any);
		if toggled {
			*show_stats = !*show_stats;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::particle_field::field::FieldParams;
	use crate::components::particle_field::random::RngSource;

	fn field() -> ParticleField {
		ParticleField::with_rng(100.0, 100.0, FieldParams::default(), RngSource::seeded(2))
	}

	#[test]
	fn tracks_held_keys() {
		let mut keys = KeyState::default();
		keys.key_down("ArrowUp", false);
		assert!(keys.is_down("ArrowUp"));
		keys.key_up("ArrowUp");
		assert!(!keys.is_down("ArrowUp"));
	}

	#[test]
	fn repeats_are_not_fresh_presses() {
		let mut keys = KeyState::default();
		keys.key_down("s", true);
		assert!(!keys.take_pressed("s"));
		keys.key_down("s", false);
		assert!(!keys.take_pressed("s"), "already held");
		keys.key_up("s");
		keys.key_down("s", false);
		assert!(keys.take_pressed("s"));
		assert!(!keys.take_pressed("s"));
	}

	#[test]
	fn clear_drops_all_state() {
		let mut keys = KeyState::default();
		keys.key_down("ArrowDown", false);
		keys.clear();
		assert!(!keys.is_down("ArrowDown"));
		assert!(!keys.take_pressed("ArrowDown"));
	}

	#[test]
	fn holding_up_raises_speed_each_frame() {
		let (controls, mut keys, mut f, mut stats) =
			(Controls::default(), KeyState::default(), field(), true);
		keys.key_down("ArrowUp", false);
		controls.apply(&mut keys, &mut f, &mut stats);
		controls.apply(&mut keys, &mut f, &mut stats);
		assert_eq!(f.speed_range(), (70.0, 170.0));
	}

	#[test]
	fn holding_down_lowers_speed_to_zero() {
		let (controls, mut keys, mut f, mut stats) =
			(Controls::default(), KeyState::default(), field(), true);
		keys.key_down("ArrowDown", false);
		for _ in 0..6 {
			controls.apply(&mut keys, &mut f, &mut stats);
		}
		assert_eq!(f.speed_range(), (0.0, 90.0));
		for _ in 0..20 {
			controls.apply(&mut keys, &mut f, &mut stats);
		}
		assert_eq!(f.speed_range(), (0.0, 0.0));
	}

	#[test]
	fn stats_toggle_once_per_press() {
		let (controls, mut keys, mut f, mut stats) =
			(Controls::default(), KeyState::default(), field(), true);
		keys.key_down("s", false);
		for _ in 0..5 {
			controls.apply(&mut keys, &mut f, &mut stats);
		}
		assert!(!stats);
		keys.key_up("s");
		keys.key_down("S", false);
		controls.apply(&mut keys, &mut f, &mut stats);
		assert!(stats);
	}
}
