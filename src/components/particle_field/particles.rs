//! Particle storage and the per-frame physics step.
//!
//! A [`ParticleField`] lives for one viewport session. Resizing discards it
//! and seeds a new one, so positions never carry over between sizes.

use std::f64::consts::TAU;

use rand::Rng;

use super::state::PointerState;
use super::types::{EdgeMode, FieldOptions, MAX_PARTICLES};

/// Nominal frame duration used to advance the twinkle clock.
pub const FRAME_DT: f64 = 0.016;

/// Angular speed of the radius oscillation, in radians per second.
const TWINKLE_SPEED: f64 = 2.0;

/// A single floating particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
	/// Opacity multiplier, 1.0 unless flicker is enabled.
	pub alpha: f64,
	/// Current flicker drift direction, +1.0 or -1.0.
	pub alpha_dir: f64,
	pub phase: f64, // For twinkling
}

impl Particle {
	/// A particle at rest with full opacity.
	pub fn at(x: f64, y: f64, radius: f64) -> Self {
		Self {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			radius,
			alpha: 1.0,
			alpha_dir: 1.0,
			phase: 0.0,
		}
	}

	pub fn with_velocity(self, vx: f64, vy: f64) -> Self {
		Self { vx, vy, ..self }
	}

	pub fn distance_to(&self, x: f64, y: f64) -> f64 {
		(self.x - x).hypot(self.y - y)
	}
}

/// A line to draw between two particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
	pub from: usize,
	pub to: usize,
	/// Opacity before palette and `line_opacity` scaling, in `(0, 1]`.
	pub opacity: f64,
}

/// Uniform sample in `[-magnitude, magnitude)`.
fn spread<R: Rng + ?Sized>(rng: &mut R, magnitude: f64) -> f64 {
	(rng.random::<f64>() * 2.0 - 1.0) * magnitude
}

/// The particle set for one viewport size.
#[derive(Clone, Debug)]
pub struct ParticleField {
	pub particles: Vec<Particle>,
	width: f64,
	height: f64,
	time: f64,
}

impl ParticleField {
	/// Seeds `opts.particle_count` particles uniformly over the viewport.
	///
	/// A viewport without positive, finite dimensions gets no particles, and
	/// the count never exceeds [`MAX_PARTICLES`].
	pub fn seed<R: Rng + ?Sized>(opts: &FieldOptions, width: f64, height: f64, rng: &mut R) -> Self {
		let usable = width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0;
		let count = if usable { opts.particle_count.min(MAX_PARTICLES) } else { 0 };
		let radius_span = opts.radius_max - opts.radius_min;
		let alpha_floor = opts.flicker.as_ref().map(|f| f.min_alpha);

		let particles = (0..count)
			.map(|_| {
				let x = rng.random::<f64>() * width;
				let y = rng.random::<f64>() * height;
				let vx = spread(rng, opts.speed);
				let vy = spread(rng, opts.speed);
				let radius = opts.radius_min + rng.random::<f64>() * radius_span;
				let phase = rng.random::<f64>() * TAU;
				let (alpha, alpha_dir) = match alpha_floor {
					Some(min) => (
						min + rng.random::<f64>() * (1.0 - min),
						if rng.random::<bool>() { 1.0 } else { -1.0 },
					),
					None => (1.0, 1.0),
				};
				Particle {
					x,
					y,
					vx,
					vy,
					radius,
					alpha,
					alpha_dir,
					phase,
				}
			})
			.collect();

		Self::from_particles(width, height, particles)
	}

	/// Builds a field from an explicit particle layout.
	pub fn from_particles(width: f64, height: f64, particles: Vec<Particle>) -> Self {
		Self {
			particles,
			width,
			height,
			time: 0.0,
		}
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Discards every particle and seeds a fresh set for the new size.
	pub fn resize<R: Rng + ?Sized>(&mut self, opts: &FieldOptions, width: f64, height: f64, rng: &mut R) {
		*self = Self::seed(opts, width, height, rng);
	}

	/// Advances every particle by one frame.
	///
	/// Order per particle: integrate, handle edges, drift alpha, attract.
	pub fn update<R: Rng + ?Sized>(&mut self, opts: &FieldOptions, pointer: &PointerState, rng: &mut R) {
		let (w, h) = (self.width, self.height);
		let attractor = pointer
			.position()
			.zip(opts.interaction_radius)
			.filter(|_| opts.attraction_strength > 0.0);

		for p in &mut self.particles {
			p.x += p.vx;
			p.y += p.vy;

			match opts.edges {
				EdgeMode::Bounce => {
					if p.x < 0.0 {
						p.vx = p.vx.abs();
					} else if p.x > w {
						p.vx = -p.vx.abs();
					}
					if p.y < 0.0 {
						p.vy = p.vy.abs();
					} else if p.y > h {
						p.vy = -p.vy.abs();
					}
				}
				EdgeMode::Wrap => {
					if p.x < 0.0 {
						p.x = w;
					} else if p.x > w {
						p.x = 0.0;
					}
					if p.y < 0.0 {
						p.y = h;
					} else if p.y > h {
						p.y = 0.0;
					}
				}
			}

			if let Some(flicker) = &opts.flicker {
				if rng.random::<f64>() < flicker.flip_chance {
					p.alpha_dir = -p.alpha_dir;
				}
				p.alpha += p.alpha_dir * flicker.step * rng.random::<f64>();
				p.alpha = p.alpha.clamp(flicker.min_alpha, 1.0);
			}

			if let Some(((px, py), radius)) = attractor {
				let (dx, dy) = (px - p.x, py - p.y);
				let dist = dx.hypot(dy);
				if dist > 0.0 && dist < radius {
					p.vx += opts.attraction_strength * dx / dist;
					p.vy += opts.attraction_strength * dy / dist;
				}
			}

			if let Some(max) = opts.max_speed {
				let speed = p.vx.hypot(p.vy);
				if speed > max {
					let k = if speed > 0.0 { max / speed } else { 0.0 };
					p.vx *= k;
					p.vy *= k;
				}
			}
		}

		self.time += FRAME_DT;
	}

	/// Radius to draw for `p`, oscillating by `amplitude` when non-zero.
	pub fn draw_radius(&self, p: &Particle, amplitude: f64) -> f64 {
		if amplitude <= 0.0 {
			return p.radius;
		}
		let wobble = (self.time * TWINKLE_SPEED + p.phase).sin() * amplitude;
		(p.radius * (1.0 + wobble)).max(0.0)
	}

	/// Every pair closer than `connection_distance`, with its line opacity.
	///
	/// Checks all `n * (n - 1) / 2` pairs.
	pub fn connections(&self, opts: &FieldOptions, pointer: &PointerState) -> Vec<Connection> {
		let max = opts.connection_distance;
		let mut out = Vec::new();
		if max <= 0.0 {
			return out;
		}
		let near_pointer = |p: &Particle| match (pointer.position(), opts.interaction_radius) {
			(Some((px, py)), Some(r)) => p.distance_to(px, py) < r,
			_ => false,
		};

		for (i, a) in self.particles.iter().enumerate() {
			for (j, b) in self.particles.iter().enumerate().skip(i + 1) {
				let d = a.distance_to(b.x, b.y);
				if d >= max {
					continue;
				}
				let mut opacity = 1.0 - d / max;
				if near_pointer(a) || near_pointer(b) {
					opacity += opts.link_boost;
				}
				out.push(Connection {
					from: i,
					to: j,
					opacity: opacity.min(1.0),
				});
			}
		}
		out
	}
}
