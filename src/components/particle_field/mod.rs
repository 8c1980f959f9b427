//! Animated particle background.
//!
//! Draws a field of drifting particles on a full-viewport canvas behind the
//! page content:
//! - Particles bounce off (or wrap around) the viewport edges
//! - Nearby particles are joined by lines that fade with distance
//! - The pointer brightens nearby lines and can attract particles
//! - Colors follow the page's light/dark theme, re-read every frame
//!
//! The simulation ([`ParticleField`], [`FieldState`]) is independent of the
//! browser; [`FieldHost`] and [`ParticleBackground`] attach it to a canvas.
//!
//! # Example
//!
//! ```ignore
//! use particle_backdrop::{FieldOptions, ParticleBackground};
//!
//! let options = FieldOptions { particle_count: 80, ..FieldOptions::default() };
//!
//! view! {
//!     <ParticleBackground options=options>
//!         <main>"Hello"</main>
//!     </ParticleBackground>
//! }
//! ```

mod component;
mod frame_loop;
mod host;
mod particles;
mod render;
mod state;
pub mod surface;
pub mod theme;
mod types;

pub use component::ParticleBackground;
pub use frame_loop::{FrameDriver, FrameLoop};
pub use host::FieldHost;
pub use particles::{Connection, Particle, ParticleField};
pub use render::{Painter, render};
pub use state::{FieldState, PointerState};
pub use theme::{Color, ColorScheme, Palette, ThemeMode};
pub use types::{EdgeMode, FieldOptions, FlickerOptions, MAX_PARTICLES};
