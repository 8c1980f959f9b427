//! Light/dark theming for the particle field.
//!
//! The active [`ThemeMode`] is resolved by the host every frame; this module
//! only maps a mode to the colors used for the background, points and lines.

use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Multiply the alpha channel, keeping the result in `[0, 1]`.
	pub fn fade(self, factor: f64) -> Self {
		Self {
			a: (self.a * factor).clamp(0.0, 1.0),
			..self
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// A CSS color string that could not be understood.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unsupported color: {0:?}")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
	type Err = ParseColorError;

	/// Parses hex (`#RRGGBB`) and `rgb()`/`rgba()` functional notation.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		let err = || ParseColorError(s.to_string());

		if let Some(hex) = s.strip_prefix('#') {
			if hex.len() != 6 || !hex.is_ascii() {
				return Err(err());
			}
			let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
			return Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?));
		}

		let body = s
			.strip_prefix("rgba(")
			.or_else(|| s.strip_prefix("rgb("))
			.and_then(|rest| rest.strip_suffix(')'))
			.ok_or_else(err)?;
		let nums: Vec<&str> = body.split(',').map(str::trim).collect();
		if nums.len() < 3 || nums.len() > 4 {
			return Err(err());
		}
		let channel = |i: usize| nums[i].parse::<u8>().map_err(|_| err());
		let a = match nums.get(3) {
			Some(v) => v.parse::<f64>().map_err(|_| err())?.clamp(0.0, 1.0),
			None => 1.0,
		};
		Ok(Color::rgba(channel(0)?, channel(1)?, channel(2)?, a))
	}
}

impl TryFrom<String> for Color {
	type Error = ParseColorError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

/// Which color scheme the host page currently shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
	#[default]
	Light,
	Dark,
}

impl ThemeMode {
	pub fn from_dark_flag(is_dark: bool) -> Self {
		if is_dark { ThemeMode::Dark } else { ThemeMode::Light }
	}
}

/// Colors for one theme mode.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Palette {
	/// Top stop of the vertical background gradient.
	pub background_top: Color,
	/// Bottom stop of the vertical background gradient.
	pub background_bottom: Color,
	/// Fill color of particles.
	pub point: Color,
	/// Stroke color of connections. Its alpha is scaled per line.
	pub line: Color,
}

impl Palette {
	pub fn dark() -> Self {
		Self {
			background_top: Color::rgb(5, 5, 5),
			background_bottom: Color::rgb(17, 17, 17),
			point: Color::rgba(255, 255, 255, 0.8),
			line: Color::rgb(255, 255, 255),
		}
	}

	pub fn light() -> Self {
		Self {
			background_top: Color::rgb(240, 244, 248),
			background_bottom: Color::rgb(208, 231, 255),
			point: Color::rgba(0, 0, 0, 0.7),
			line: Color::rgb(0, 0, 0),
		}
	}

	/// True when both gradient stops match and a flat fill suffices.
	pub fn is_flat(&self) -> bool {
		self.background_top == self.background_bottom
	}
}

/// Palette pair keyed by [`ThemeMode`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ColorScheme {
	pub light: Palette,
	pub dark: Palette,
}

impl ColorScheme {
	pub fn palette(&self, mode: ThemeMode) -> &Palette {
		match mode {
			ThemeMode::Light => &self.light,
			ThemeMode::Dark => &self.dark,
		}
	}
}

impl Default for ColorScheme {
	fn default() -> Self {
		Self {
			light: Palette::light(),
			dark: Palette::dark(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_hex_and_functional_colors() {
		assert_eq!("#050505".parse::<Color>(), Ok(Color::rgb(5, 5, 5)));
		assert_eq!(
			"rgba(255, 255, 255, 0.8)".parse::<Color>(),
			Ok(Color::rgba(255, 255, 255, 0.8))
		);
		assert_eq!("rgb(0,0,0)".parse::<Color>(), Ok(Color::rgb(0, 0, 0)));
	}

	#[test]
	fn rejects_malformed_colors() {
		assert!("#05050".parse::<Color>().is_err());
		assert!("rgb(300, 0, 0)".parse::<Color>().is_err());
		assert!("white".parse::<Color>().is_err());
		assert!("rgba(1, 2)".parse::<Color>().is_err());
	}

	#[test]
	fn css_output_drops_alpha_when_opaque() {
		assert_eq!(Color::rgb(240, 244, 248).to_css(), "#f0f4f8");
		assert_eq!(Color::rgb(0, 0, 0).fade(0.25).to_css(), "rgba(0, 0, 0, 0.25)");
	}

	#[test]
	fn scheme_selects_palette_by_mode() {
		let scheme = ColorScheme::default();
		assert_eq!(scheme.palette(ThemeMode::Dark).point, Color::rgba(255, 255, 255, 0.8));
		assert_eq!(scheme.palette(ThemeMode::Light).point, Color::rgba(0, 0, 0, 0.7));
		assert!(!scheme.dark.is_flat());
	}

	#[test]
	fn palette_deserializes_from_css_strings() {
		let json = r##"{
			"background_top": "#000000",
			"background_bottom": "#000000",
			"point": "rgba(10, 20, 30, 0.5)",
			"line": "#ffffff"
		}"##;
		let palette: Palette = serde_json::from_str(json).unwrap();
		assert!(palette.is_flat());
		assert_eq!(palette.point, Color::rgba(10, 20, 30, 0.5));
	}
}
