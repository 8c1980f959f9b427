//! Simulation state owned by one mounted background.
//!
//! Bundles the particle set with its options, the latest pointer position and
//! the random source used for seeding and flicker. Nothing here touches the
//! DOM, so the whole state can be driven from tests.

use log::debug;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::particles::{Connection, ParticleField};
use super::types::FieldOptions;

/// Latest pointer position in viewport coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerState {
	pub x: f64,
	pub y: f64,
	/// Whether the pointer is currently over the viewport.
	pub inside: bool,
}

impl PointerState {
	pub fn at(x: f64, y: f64) -> Self {
		Self { x, y, inside: true }
	}

	pub fn move_to(&mut self, x: f64, y: f64) {
		self.x = x;
		self.y = y;
		self.inside = true;
	}

	pub fn leave(&mut self) {
		self.inside = false;
	}

	/// Position when the pointer is inside the viewport.
	pub fn position(&self) -> Option<(f64, f64)> {
		self.inside.then_some((self.x, self.y))
	}
}

/// Particle field plus everything needed to advance it.
///
/// Created when the component mounts and re-seeded on every resize.
pub struct FieldState {
	pub field: ParticleField,
	pub options: FieldOptions,
	pub pointer: PointerState,
	rng: SmallRng,
}

impl FieldState {
	/// Seeds a field for the given viewport using a deterministic random source.
	pub fn new(options: FieldOptions, width: f64, height: f64, seed: u64) -> Self {
		let options = options.sanitized();
		let mut rng = SmallRng::seed_from_u64(seed);
		let field = ParticleField::seed(&options, width, height, &mut rng);
		debug!(
			"particle-field: seeded {} particles for {}x{}",
			field.len(),
			width,
			height
		);
		Self {
			field,
			options,
			pointer: PointerState::default(),
			rng,
		}
	}

	pub fn width(&self) -> f64 {
		self.field.width()
	}

	pub fn height(&self) -> f64 {
		self.field.height()
	}

	/// Replaces the particle set with a fresh one for the new viewport.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.field.resize(&self.options, width, height, &mut self.rng);
		debug!(
			"particle-field: re-seeded {} particles for {}x{}",
			self.field.len(),
			width,
			height
		);
	}

	/// Advances all particles by one frame.
	pub fn tick(&mut self) {
		self.field.update(&self.options, &self.pointer, &mut self.rng);
	}

	pub fn connections(&self) -> Vec<Connection> {
		self.field.connections(&self.options, &self.pointer)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::particle_field::types::MAX_PARTICLES;

	#[test]
	fn pointer_position_requires_inside() {
		let mut pointer = PointerState::default();
		assert_eq!(pointer.position(), None);
		pointer.move_to(3.0, 4.0);
		assert_eq!(pointer.position(), Some((3.0, 4.0)));
		pointer.leave();
		assert_eq!(pointer.position(), None);
	}

	#[test]
	fn new_state_sanitizes_options() {
		let options = FieldOptions {
			particle_count: 5,
			speed: -1.0,
			..FieldOptions::default()
		};
		let state = FieldState::new(options, 100.0, 100.0, 1);
		assert_eq!(state.options.speed, 1.0);
		assert_eq!(state.field.len(), 5);
	}

	#[test]
	fn oversized_count_seeds_at_most_the_limit() {
		let options = FieldOptions {
			particle_count: usize::MAX,
			..FieldOptions::default()
		};
		let mut state = FieldState::new(options, 800.0, 600.0, 1);
		assert_eq!(state.options.particle_count, MAX_PARTICLES);
		assert_eq!(state.field.len(), MAX_PARTICLES);
		state.resize(400.0, 300.0);
		assert_eq!(state.field.len(), MAX_PARTICLES);
	}

	#[test]
	fn resize_keeps_count_and_updates_bounds() {
		let options = FieldOptions {
			particle_count: 12,
			..FieldOptions::default()
		};
		let mut state = FieldState::new(options, 800.0, 600.0, 9);
		state.resize(320.0, 200.0);
		assert_eq!(state.field.len(), 12);
		assert_eq!((state.width(), state.height()), (320.0, 200.0));
	}

	#[test]
	fn zero_particles_is_valid() {
		let options = FieldOptions {
			particle_count: 0,
			..FieldOptions::default()
		};
		let mut state = FieldState::new(options, 800.0, 600.0, 2);
		state.tick();
		assert!(state.field.is_empty());
		assert!(state.connections().is_empty());
	}
}
