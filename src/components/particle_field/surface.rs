//! Reads from the host page: viewport size, drawing context, active theme.

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::theme::ThemeMode;

/// Class on the document root that marks dark mode.
pub const DARK_CLASS: &str = "dark";

/// Why the drawing surface could not be set up.
///
/// Never surfaced to the user: the background falls back to rendering its
/// children without animation.
#[derive(Debug, Error)]
pub enum SurfaceError {
	#[error("no global window")]
	NoWindow,
	#[error("no document on window")]
	NoDocument,
	#[error("canvas has no 2d context")]
	NoContext,
	#[error("javascript error: {0}")]
	Js(String),
}

impl From<JsValue> for SurfaceError {
	fn from(value: JsValue) -> Self {
		SurfaceError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
	}
}

/// Current `innerWidth`/`innerHeight` of the window.
pub fn viewport_size(window: &Window) -> Result<(f64, f64), SurfaceError> {
	let w = window.inner_width()?.as_f64();
	let h = window.inner_height()?.as_f64();
	w.zip(h)
		.ok_or_else(|| SurfaceError::Js("viewport size is not a number".into()))
}

/// Acquires the canvas' 2D context.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, SurfaceError> {
	canvas
		.get_context("2d")?
		.ok_or(SurfaceError::NoContext)?
		.dyn_into::<CanvasRenderingContext2d>()
		.map_err(|_| SurfaceError::NoContext)
}

/// Sets the canvas backing store to the given size in pixels.
pub fn size_canvas(canvas: &HtmlCanvasElement, width: f64, height: f64) {
	canvas.set_width(width.max(0.0) as u32);
	canvas.set_height(height.max(0.0) as u32);
}

/// Theme currently shown by the page; light when it cannot be determined.
pub fn current_theme() -> ThemeMode {
	let is_dark = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.document_element())
		.map(|root| root.class_list().contains(DARK_CLASS))
		.unwrap_or(false);
	ThemeMode::from_dark_flag(is_dark)
}

/// Flips the dark class on the document root.
pub fn toggle_theme() -> Result<ThemeMode, SurfaceError> {
	let root = web_sys::window()
		.ok_or(SurfaceError::NoWindow)?
		.document()
		.ok_or(SurfaceError::NoDocument)?
		.document_element()
		.ok_or(SurfaceError::NoDocument)?;
	let is_dark = root.class_list().toggle(DARK_CLASS)?;
	Ok(ThemeMode::from_dark_flag(is_dark))
}

/// Seed for a fresh random source, taken from the browser's RNG.
pub fn entropy_seed() -> u64 {
	let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
	let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
	(hi << 32) | lo
}
