//! Configuration accepted by the particle background component.

use log::warn;
use serde::Deserialize;

use super::theme::ColorScheme;

/// How particles behave when they reach the viewport edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMode {
	/// Invert the velocity component that points out of the viewport.
	#[default]
	Bounce,
	/// Re-enter from the opposite edge.
	Wrap,
}

/// Random opacity drift ("flicker") applied to every particle.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlickerOptions {
	/// Lower bound for particle alpha. Upper bound is always 1.0.
	pub min_alpha: f64,
	/// Largest alpha change per frame.
	pub step: f64,
	/// Per-frame probability that the drift direction reverses.
	pub flip_chance: f64,
}

impl Default for FlickerOptions {
	fn default() -> Self {
		Self {
			min_alpha: 0.3,
			step: 0.02,
			flip_chance: 0.05,
		}
	}
}

/// Upper bound on `particle_count`. Line drawing checks every pair each
/// frame, so counts far above this stall the page.
pub const MAX_PARTICLES: usize = 2_000;

/// Options for a particle field. Every field has a default, so a partial
/// JSON object (or `{}`) is a valid configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldOptions {
	/// Number of particles seeded per viewport session.
	pub particle_count: usize,
	/// Maximum per-axis velocity magnitude at seed time.
	pub speed: f64,
	pub radius_min: f64,
	pub radius_max: f64,
	/// Pairs closer than this are joined by a line.
	pub connection_distance: f64,
	pub line_width: f64,
	/// Multiplier applied to every connection's opacity.
	pub line_opacity: f64,
	/// Pointer proximity radius. `None` disables pointer effects.
	pub interaction_radius: Option<f64>,
	/// Opacity added to connections near the pointer.
	pub link_boost: f64,
	/// Per-frame velocity increment toward the pointer. Zero disables attraction.
	pub attraction_strength: f64,
	/// Optional cap on velocity magnitude. `None` lets attraction accumulate.
	pub max_speed: Option<f64>,
	pub edges: EdgeMode,
	pub flicker: Option<FlickerOptions>,
	/// Radius oscillation amplitude as a fraction of the radius. Zero disables it.
	pub twinkle: f64,
	pub colors: ColorScheme,
}

impl Default for FieldOptions {
	fn default() -> Self {
		Self {
			particle_count: 120,
			speed: 0.15,
			radius_min: 0.3,
			radius_max: 1.6,
			connection_distance: 120.0,
			line_width: 0.6,
			line_opacity: 0.5,
			interaction_radius: Some(150.0),
			link_boost: 0.3,
			attraction_strength: 0.0,
			max_speed: None,
			edges: EdgeMode::Bounce,
			flicker: None,
			twinkle: 0.0,
			colors: ColorScheme::default(),
		}
	}
}

/// Returns `value` when finite and non-negative, its magnitude when finite
/// and negative, and `fallback` otherwise.
fn non_negative(value: f64, fallback: f64) -> f64 {
	if value.is_finite() { value.abs() } else { fallback }
}

impl FieldOptions {
	/// Brings every option into a range the simulation can use.
	///
	/// Never fails: malformed values are replaced, not rejected.
	pub fn sanitized(mut self) -> Self {
		let d = Self::default();

		if self.particle_count > MAX_PARTICLES {
			warn!(
				"particle-field: particle_count {} reduced to {}",
				self.particle_count, MAX_PARTICLES
			);
			self.particle_count = MAX_PARTICLES;
		}
		self.speed = non_negative(self.speed, d.speed);
		self.radius_min = non_negative(self.radius_min, d.radius_min);
		self.radius_max = non_negative(self.radius_max, d.radius_max);
		if self.radius_min > self.radius_max {
			std::mem::swap(&mut self.radius_min, &mut self.radius_max);
		}
		self.connection_distance = if self.connection_distance.is_finite() {
			self.connection_distance.max(0.0)
		} else {
			d.connection_distance
		};
		self.line_width = non_negative(self.line_width, d.line_width);
		self.line_opacity = non_negative(self.line_opacity, d.line_opacity).min(1.0);
		self.interaction_radius = self
			.interaction_radius
			.filter(|r| r.is_finite() && *r > 0.0);
		self.link_boost = non_negative(self.link_boost, d.link_boost);
		self.attraction_strength = non_negative(self.attraction_strength, 0.0);
		self.max_speed = self.max_speed.filter(|s| s.is_finite() && *s >= 0.0);
		self.twinkle = non_negative(self.twinkle, 0.0).min(1.0);
		self.flicker = self.flicker.map(|f| {
			let fd = FlickerOptions::default();
			FlickerOptions {
				min_alpha: non_negative(f.min_alpha, fd.min_alpha).min(1.0),
				step: non_negative(f.step, fd.step),
				flip_chance: non_negative(f.flip_chance, fd.flip_chance).min(1.0),
			}
		});
		self
	}
}
