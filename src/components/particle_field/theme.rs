//! Visual theming for the particle field.
//!
//! Background gradient stops, particle color and stats overlay styling.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel
	pub r: u8,
	/// Green channel
	pub g: u8,
	/// Blue channel
	pub b: u8,
	/// Opacity in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Same color with an 8-bit alpha (0 = transparent, 255 = opaque).
	pub fn with_alpha_byte(self, alpha: u8) -> Self {
		Self {
			a: alpha as f64 / 255.0,
			..self
		}
	}

	/// Alpha as an 8-bit value.
	pub fn alpha_byte(self) -> u8 {
		(self.a.clamp(0.0, 1.0) * 255.0).round() as u8
	}

	/// CSS hex for opaque colors, `rgba()` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Vertical background gradient.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Color along the top edge
	pub top: Color,
	/// Color along the bottom edge
	pub bottom: Color,
}

/// Stats overlay text style.
#[derive(Clone, Debug)]
pub struct StatsStyle {
	/// Text color
	pub color: Color,
	/// CSS font shorthand
	pub font: &'static str,
	/// Left and top inset in pixels
	pub margin: f64,
	/// Vertical spacing between lines in pixels
	pub line_height: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Theme identifier
	pub name: &'static str,
	/// Backdrop drawn under the particles
	pub background: BackgroundStyle,
	/// Base particle color; per-particle alpha replaces its alpha.
	pub particle_color: Color,
	/// Stats overlay styling
	pub stats: StatsStyle,
}

impl Theme {
	/// Midnight blue fading into light sky blue, white particles.
	pub fn sky() -> Self {
		Self {
			name: "sky",
			background: BackgroundStyle {
				top: Color::rgb(25, 25, 112),
				bottom: Color::rgb(135, 206, 250),
			},
			particle_color: Color::rgb(255, 255, 255),
			stats: StatsStyle {
				color: Color::rgb(255, 255, 255),
				font: "16px sans-serif",
				margin: 5.0,
				line_height: 18.0,
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::sky()
	}
}
