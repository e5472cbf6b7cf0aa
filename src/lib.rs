//! ambient-fx: Ambient falling-particle and floating-lantern overlay.
//!
//! This crate provides a WASM component that layers a snow/ember particle
//! simulation and a set of floating lanterns over a page, without ever
//! intercepting input, and that stays off entirely for users who prefer
//! reduced motion.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::ambient::{
	AmbientEffects, Capability, Color, DeviceClass, EffectConfig, Theme, ThemeName,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("ambient-fx: logging initialized");
}

/// Load effect options from a script element with id="ambient-config".
/// Expected format: JSON, e.g. { "particleColor": "#fff", "zIndexLayer": 20 }
fn load_effect_config() -> Option<EffectConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("ambient-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match EffectConfig::from_json(&json_text) {
		Ok(config) => {
			info!("ambient-fx: loaded config (theme {:?})", config.theme);
			Some(config)
		}
		Err(e) => {
			warn!("ambient-fx: failed to parse config, using defaults: {}", e);
			None
		}
	}
}

/// Main application component.
/// Reads page configuration from the DOM and mounts the ambient layers.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_effect_config().unwrap_or_default();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Ambient Effects" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<AmbientEffects config=config />
	}
}
