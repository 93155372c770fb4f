//! spoiler-field: animated particle field over a gradient background.
//!
//! This crate provides a WASM-based canvas component that renders drifting,
//! fading particles whose population adapts to the measured frame rate.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

#[cfg(target_arch = "wasm32")]
use getrandom as _;

pub mod components;

pub use components::particle_field::{
	AdaptiveController, FieldConfig, ParameterUpdate, Particle, ParticleField, ParticleFieldCanvas,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("spoiler-field: logging initialized");
}

/// Load configuration from a script element with id="field-config".
/// Expected format: JSON object, every field optional.
fn load_config() -> Option<FieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("field-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match FieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!("spoiler-field: loaded config {:?}", config);
			Some(config)
		}
		Err(e) => {
			warn!("spoiler-field: failed to parse config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads configuration from the DOM and renders the particle field.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config().unwrap_or_default();
	let config_signal = Signal::derive(move || config.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Spoiler Field" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-field">
			<ParticleFieldCanvas config=config_signal fullscreen=true />
		</div>
	}
}
