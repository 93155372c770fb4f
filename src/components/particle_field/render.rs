//! Canvas rendering for the particle field.
//!
//! Each frame is drawn in three passes:
//! 1. Vertical gradient background
//! 2. Particles, drawn to an offscreen layer and composited on top
//! 3. Stats overlay text (optional)

use std::f64::consts::PI;

use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use super::field::ParticleField;
use super::random::RandomSource;
use super::state::FrameStats;
use super::theme::{Color, Theme};

/// Anything that can draw filled circles.
pub trait Surface {
	/// Fills a circle centred on `(x, y)`.
	fn fill_circle(&self, x: i32, y: i32, radius: i32, color: Color);
}

impl Surface for CanvasRenderingContext2d {
	fn fill_circle(&self, x: i32, y: i32, radius: i32, color: Color) {
		self.set_fill_style_str(&color.to_css());
		self.begin_path();
		let _ = self.arc(x as f64, y as f64, radius as f64, 0.0, PI * 2.0);
		self.fill();
	}
}

/// Transparent offscreen canvas the particles are drawn onto.
pub struct ParticleLayer {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl ParticleLayer {
	/// Creates a detached canvas of the given size.
	pub fn new(document: &Document, width: f64, height: f64) -> Option<Self> {
		let canvas: HtmlCanvasElement = document.create_element("canvas").ok()?.dyn_into().ok()?;
		let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;
		let layer = Self { canvas, ctx };
		layer.resize(width, height);
		Some(layer)
	}

	/// Matches the layer to the visible canvas.
	pub fn resize(&self, width: f64, height: f64) {
		self.canvas.set_width(width as u32);
		self.canvas.set_height(height as u32);
	}

	fn clear(&self) {
		self.ctx.clear_rect(
			0.0,
			0.0,
			self.canvas.width() as f64,
			self.canvas.height() as f64,
		);
	}

	fn composite_onto(&self, ctx: &CanvasRenderingContext2d) {
		if let Err(e) = ctx.draw_image_with_html_canvas_element(&self.canvas, 0.0, 0.0) {
			warn!("spoiler-field: failed to composite particle layer: {:?}", e);
		}
	}
}

/// Renders a complete frame to the canvas.
pub fn render<R: RandomSource>(
	ctx: &CanvasRenderingContext2d,
	layer: &ParticleLayer,
	field: &ParticleField<R>,
	theme: &Theme,
	stats: Option<&FrameStats>,
) {
	let (width, height) = field.bounds();

	draw_background(ctx, theme, width, height);

	layer.clear();
	field.render_all(&layer.ctx, theme.particle_color);
	layer.composite_onto(ctx);

	if let Some(stats) = stats {
		draw_stats(ctx, theme, stats);
	}
}

fn draw_background(ctx: &CanvasRenderingContext2d, theme: &Theme, width: f64, height: f64) {
	let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, height);
	let stops = gradient
		.add_color_stop(0.0, &theme.background.top.to_css())
		.and_then(|_| gradient.add_color_stop(1.0, &theme.background.bottom.to_css()));

	if stops.is_ok() {
		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
	} else {
		ctx.set_fill_style_str(&theme.background.top.to_css());
	}

	ctx.fill_rect(0.0, 0.0, width, height);
}

fn draw_stats(ctx: &CanvasRenderingContext2d, theme: &Theme, stats: &FrameStats) {
	let style = &theme.stats;
	ctx.set_fill_style_str(&style.color.to_css());
	ctx.set_font(style.font);
	ctx.set_text_baseline("top");

	let mut y = style.margin;
	for line in stats_lines(stats) {
		let _ = ctx.fill_text(&line, style.margin, y);
		y += style.line_height;
	}
}

/// Overlay text, one entry per line.
pub fn stats_lines(stats: &FrameStats) -> [String; 4] {
	let (min, max) = stats.speed_range;
	[
		format!("FPS: {:.1}", stats.fps),
		format!("Particles: {}", stats.particles),
		format!("Speed: ({}, {})", min, max),
		format!("Max: {}", stats.max_particles),
	]
}
