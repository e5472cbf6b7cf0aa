//! Host-supplied configuration for the ambient layers.

use serde::Deserialize;

use super::theme::{Color, Theme, ThemeName};

/// Default stacking layer: above page content, below modal overlays.
pub const DEFAULT_Z_INDEX: i32 = 30;

/// Options recognised on mount. Every field is optional in JSON.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EffectConfig {
	/// CSS color for particles (e.g., "#ffffff" or "rgb(255, 255, 255)").
	/// Overrides the theme's particle color when it parses.
	pub particle_color: Option<String>,
	/// Fixed particle count, bypassing the device-class heuristic.
	pub particle_count_override: Option<usize>,
	/// CSS `z-index` of both layers.
	pub z_index_layer: i32,
	/// Color preset.
	pub theme: ThemeName,
	/// Whether the floating lantern layer is shown.
	pub lanterns: bool,
	/// Optional clamp on the elapsed time fed to one simulation step
	/// (seconds). Unset by default, so motion tracks wall-clock time at any
	/// frame rate.
	pub max_frame_delta: Option<f64>,
}

impl Default for EffectConfig {
	fn default() -> Self {
		Self {
			particle_color: None,
			particle_count_override: None,
			z_index_layer: DEFAULT_Z_INDEX,
			theme: ThemeName::default(),
			lanterns: true,
			max_frame_delta: None,
		}
	}
}

impl EffectConfig {
	/// Parse from a JSON document.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	/// Resolve the theme, applying the particle color override if it parses.
	pub fn theme(&self) -> Theme {
		let mut theme = Theme::from_name(self.theme);
		if let Some(color) = self.particle_color.as_deref().and_then(Color::parse) {
			theme.particle_color = color.with_alpha(1.0);
		}
		theme
	}

	/// Step clamp in seconds. Unset, non-finite and non-positive values
	/// mean no clamp.
	pub fn frame_delta_cap(&self) -> f64 {
		match self.max_frame_delta {
			Some(cap) if cap.is_finite() && cap > 0.0 => cap,
			_ => f64::INFINITY,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_object_yields_defaults() {
		let config = EffectConfig::from_json("{}").unwrap();
		assert_eq!(config, EffectConfig::default());
		assert_eq!(config.z_index_layer, DEFAULT_Z_INDEX);
		assert!(config.lanterns);
	}

	#[test]
	fn reads_camel_case_options() {
		let config = EffectConfig::from_json(
			r##"{
				"particleColor": "#ff0000",
				"particleCountOverride": 12,
				"zIndexLayer": 5,
				"theme": "ember",
				"lanterns": false
			}"##,
		)
		.unwrap();
		assert_eq!(config.particle_count_override, Some(12));
		assert_eq!(config.z_index_layer, 5);
		assert_eq!(config.theme, ThemeName::Ember);
		assert!(!config.lanterns);
		assert_eq!(config.theme().particle_color, Color::rgb(255, 0, 0));
	}

	#[test]
	fn unparseable_color_keeps_theme_color() {
		let config = EffectConfig {
			particle_color: Some("not-a-color".into()),
			..Default::default()
		};
		assert_eq!(config.theme().particle_color, Theme::snow().particle_color);
	}

	#[test]
	fn frame_delta_is_uncapped_by_default() {
		assert_eq!(EffectConfig::default().frame_delta_cap(), f64::INFINITY);
	}

	#[test]
	fn explicit_frame_cap_is_kept() {
		let config = EffectConfig::from_json(r#"{"maxFrameDelta": 0.1}"#).unwrap();
		assert_eq!(config.frame_delta_cap(), 0.1);
	}

	#[test]
	fn invalid_frame_cap_disables_clamp() {
		let config = EffectConfig {
			max_frame_delta: Some(-1.0),
			..Default::default()
		};
		assert_eq!(config.frame_delta_cap(), f64::INFINITY);
	}

	#[test]
	fn rejects_unknown_theme() {
		assert!(EffectConfig::from_json(r#"{"theme": "plaid"}"#).is_err());
	}
}
