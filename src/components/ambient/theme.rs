//! Colours and visual presets for the ambient layers.

use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same hue, different alpha.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// CSS notation: `#rrggbb` when opaque, `rgba(..)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parses a CSS color string.
	/// Supports hex (`#RRGGBB`) and `rgb()`/`rgba()` functional notation.
	pub fn parse(color_str: &str) -> Option<Self> {
		let s = color_str.trim();
		if let Some(hex) = s.strip_prefix('#') {
			if hex.len() != 6 || !hex.is_ascii() {
				return None;
			}
			let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
			let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
			let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
			return Some(Color::rgb(r, g, b));
		}

		let body = s
			.strip_prefix("rgba(")
			.or_else(|| s.strip_prefix("rgb("))?
			.strip_suffix(')')?;
		let nums: Vec<&str> = body.split(',').map(str::trim).collect();
		if nums.len() < 3 || nums.len() > 4 {
			return None;
		}
		let r = nums[0].parse().ok()?;
		let g = nums[1].parse().ok()?;
		let b = nums[2].parse().ok()?;
		let a = match nums.get(3) {
			Some(a) => a.parse::<f64>().ok()?.clamp(0.0, 1.0),
			None => 1.0,
		};
		Some(Color::rgba(r, g, b, a))
	}
}

/// Named preset selectable from page configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
	/// White particles, pale lanterns.
	#[default]
	Snow,
	/// Warm orange particles and lanterns.
	Ember,
}

/// Lantern visual style.
#[derive(Clone, Debug)]
pub struct LanternStyle {
	/// Lantern body fill
	pub body: Color,
	/// Soft halo around the body
	pub glow: Color,
	/// Body width in pixels (height is derived)
	pub width: f64,
}

/// Complete visual theme for both layers.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Preset name as written in configuration.
	pub name: &'static str,
	/// Particle hue; per-particle opacity replaces its alpha.
	pub particle_color: Color,
	/// Lantern appearance.
	pub lantern: LanternStyle,
}

impl Theme {
	/// White snowfall with pale paper lanterns (default)
	pub fn snow() -> Self {
		Self {
			name: "snow",
			particle_color: Color::rgb(255, 255, 255),
			lantern: LanternStyle {
				body: Color::rgba(255, 236, 200, 0.85),
				glow: Color::rgba(255, 214, 150, 0.35),
				width: 26.0,
			},
		}
	}

	/// Rising-ember palette with warm red lanterns
	pub fn ember() -> Self {
		Self {
			name: "ember",
			particle_color: Color::rgb(255, 150, 70),
			lantern: LanternStyle {
				body: Color::rgba(220, 70, 40, 0.9),
				glow: Color::rgba(255, 120, 50, 0.4),
				width: 28.0,
			},
		}
	}

	/// Preset for a configured name.
	pub fn from_name(name: ThemeName) -> Self {
		match name {
			ThemeName::Snow => Self::snow(),
			ThemeName::Ember => Self::ember(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::snow()
	}
}
