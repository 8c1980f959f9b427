//! particle-backdrop: animated particle background for a portfolio site.
//!
//! This crate provides a WASM canvas component that draws drifting, connected
//! particles behind page content, reacting to the pointer and to the page's
//! light/dark theme.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{
	EdgeMode, FieldHost, FieldOptions, FlickerOptions, ParticleBackground, ThemeMode,
};

use components::particle_field::surface;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-backdrop: logging initialized");
}

/// Parses background options from JSON, sanitizing out-of-range values.
pub fn parse_field_options(json: &str) -> Result<FieldOptions, serde_json::Error> {
	serde_json::from_str::<FieldOptions>(json).map(FieldOptions::sanitized)
}

/// Load background options from a script element with id="particle-config".
/// Expected format: JSON object with any subset of the [`FieldOptions`] fields.
fn load_field_options() -> Option<FieldOptions> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match parse_field_options(&json_text) {
		Ok(options) => {
			info!(
				"particle-backdrop: loaded config ({} particles, {:?} edges)",
				options.particle_count, options.edges
			);
			Some(options)
		}
		Err(e) => {
			warn!("particle-backdrop: failed to parse config: {}", e);
			None
		}
	}
}

/// Button flipping the page between light and dark mode.
#[component]
pub fn ThemeToggle() -> impl IntoView {
	let (mode, set_mode) = signal(surface::current_theme());
	let on_click = move |_| match surface::toggle_theme() {
		Ok(next) => set_mode.set(next),
		Err(e) => warn!("particle-backdrop: theme toggle failed: {}", e),
	};

	view! {
		<button class="theme-toggle" on:click=on_click>
			{move || match mode.get() {
				ThemeMode::Light => "Dark mode",
				ThemeMode::Dark => "Light mode",
			}}
		</button>
	}
}

/// Main application component.
/// Loads background options from the DOM and renders the page shell on top.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let options = load_field_options().unwrap_or_default();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleBackground options=options>
			<header class="site-header">
				<ThemeToggle />
			</header>
			<main class="hero">
				<h1>"Hello, I build things for the web."</h1>
				<p class="subtitle">"Move the pointer to light up the constellation."</p>
			</main>
		</ParticleBackground>
	}
}
