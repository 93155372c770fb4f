//! Startup configuration for the particle field.

use serde::Deserialize;

use super::particle::Range;

/// Tunable values read once at startup. Missing fields take their defaults.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
	/// Initial particle speed range in pixels per second.
	pub speed_range: Range,
	/// Particle lifetime range in seconds.
	pub life_range: Range,
	/// Fade-in duration range in seconds.
	pub fade_range: Range,
	/// Starting population cap. Adjusted at runtime by frame rate.
	pub max_particles: usize,
	/// Frame rate cap; `0` runs at the display rate.
	pub target_fps: u32,
	/// Whether the stats overlay starts visible.
	pub show_stats: bool,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			speed_range: (50.0, 150.0),
			life_range: (1.5, 3.0),
			fade_range: (0.8, 1.5),
			max_particles: 500,
			target_fps: 60,
			show_stats: true,
		}
	}
}

impl FieldConfig {
	/// Parses a JSON object; absent fields take their defaults.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}
}
