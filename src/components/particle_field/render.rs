//! Drawing for the particle field.
//!
//! One frame is drawn in three passes, back to front:
//! 1. Background gradient for the active theme
//! 2. Connection lines between nearby particles
//! 3. Particle dots
//!
//! All drawing goes through [`Painter`], which the browser canvas context
//! implements; tests substitute a recorder.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::FieldState;
use super::theme::{Color, ThemeMode};

/// The drawing primitives a frame needs.
pub trait Painter {
	/// Fills `[0, width] x [0, height]` with a top-to-bottom gradient.
	fn fill_vertical_gradient(&mut self, width: f64, height: f64, top: Color, bottom: Color);
	fn fill_rect(&mut self, width: f64, height: f64, color: Color);
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64);
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);
}

impl Painter for CanvasRenderingContext2d {
	fn fill_vertical_gradient(&mut self, width: f64, height: f64, top: Color, bottom: Color) {
		let gradient = self.create_linear_gradient(0.0, 0.0, 0.0, height);
		let _ = gradient.add_color_stop(0.0, &top.to_css());
		let _ = gradient.add_color_stop(1.0, &bottom.to_css());

		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		CanvasRenderingContext2d::fill_rect(self, 0.0, 0.0, width, height);
	}

	fn fill_rect(&mut self, width: f64, height: f64, color: Color) {
		self.set_fill_style_str(&color.to_css());
		CanvasRenderingContext2d::fill_rect(self, 0.0, 0.0, width, height);
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64) {
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.stroke();
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.set_fill_style_str(&color.to_css());
		self.fill();
	}
}

/// Draws one complete frame of `state` in the colors of `mode`.
pub fn render<P: Painter + ?Sized>(state: &FieldState, painter: &mut P, mode: ThemeMode) {
	let palette = state.options.colors.palette(mode);
	let (w, h) = (state.width(), state.height());

	if palette.is_flat() {
		painter.fill_rect(w, h, palette.background_top);
	} else {
		painter.fill_vertical_gradient(w, h, palette.background_top, palette.background_bottom);
	}

	draw_connections(state, painter, palette.line);
	draw_particles(state, painter, palette.point);
}

fn draw_connections<P: Painter + ?Sized>(state: &FieldState, painter: &mut P, color: Color) {
	let particles = &state.field.particles;
	let opts = &state.options;

	for link in state.connections() {
		let (a, b) = (&particles[link.from], &particles[link.to]);
		painter.stroke_line(
			(a.x, a.y),
			(b.x, b.y),
			color.fade(link.opacity * opts.line_opacity),
			opts.line_width,
		);
	}
}

fn draw_particles<P: Painter + ?Sized>(state: &FieldState, painter: &mut P, color: Color) {
	for p in &state.field.particles {
		let radius = state.field.draw_radius(p, state.options.twinkle);
		if radius <= 0.0 {
			continue;
		}
		painter.fill_circle(p.x, p.y, radius, color.fade(p.alpha));
	}
}
