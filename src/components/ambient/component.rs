//! Leptos components mounting the particle and lantern layers.
//!
//! `AmbientEffects` inspects the host once. With motion enabled it renders a
//! fixed, pointer-transparent canvas driven by a [`Scheduler`] through
//! `requestAnimationFrame`, plus a CSS-animated lantern layer. With motion
//! disabled it renders nothing at all.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::info;
use send_wrapper::SendWrapper;
use web_sys::HtmlCanvasElement;

use super::config::EffectConfig;
use super::host::{BrowserHost, BrowserScheduler};
use super::lanterns::{Lantern, keyframes_css};
use super::capability::{BrowserSignals, Capability, detect};
use super::scheduler::{Scheduler, SchedulerSettings};
use super::theme::Theme;

/// Shared layer styling: full viewport, never intercepts pointer input.
fn layer_style(z_index: i32) -> String {
	format!(
		"position: fixed; inset: 0; width: 100vw; height: 100vh; \
		 pointer-events: none; overflow: hidden; z-index: {};",
		z_index
	)
}

/// Ambient falling particles and floating lanterns.
///
/// Place once near the root of the page. Configuration is read when the
/// component is created; changing the reduced-motion preference afterwards
/// takes effect on the next mount.
#[component]
pub fn AmbientEffects(#[prop(optional)] config: EffectConfig) -> impl IntoView {
	let capability = detect(&BrowserSignals, config.particle_count_override);
	if !capability.motion_enabled {
		return ().into_any();
	}

	let theme = config.theme();
	let z_index = config.z_index_layer;
	let lanterns = config.lanterns.then(|| {
		view! { <LanternLayer theme=theme.clone() z_index=z_index /> }
	});

	view! {
		<ParticleLayer capability=capability config=config theme=theme />
		{lanterns}
	}
	.into_any()
}

/// Canvas layer running the particle simulation.
#[component]
pub fn ParticleLayer(capability: Capability, config: EffectConfig, theme: Theme) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let engine: Rc<RefCell<Option<BrowserScheduler>>> = Rc::new(RefCell::new(None));
	let engine_init = engine.clone();
	let style = layer_style(config.z_index_layer);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if engine_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let Some(document) = window.document() else {
			return;
		};

		let host = BrowserHost::new(window, document, canvas);
		let visible = host.page_visible();
		let settings = SchedulerSettings {
			color: theme.particle_color,
			max_frame_delta: config.frame_delta_cap(),
			seed: (js_sys::Math::random() * u64::MAX as f64) as u64,
		};

		let scheduler: BrowserScheduler = Rc::new(RefCell::new(Scheduler::new(host, settings)));
		BrowserHost::wire(&scheduler);
		scheduler.borrow_mut().mount(capability, visible);
		*engine_init.borrow_mut() = Some(scheduler);
	});

	let engine_cleanup = SendWrapper::new(engine);
	on_cleanup(move || {
		if let Some(scheduler) = engine_cleanup.borrow_mut().take() {
			scheduler.borrow_mut().teardown();
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="ambient-particles"
			aria-hidden="true"
			style=style
		/>
	}
}

/// Floating lanterns animated purely by CSS.
#[component]
pub fn LanternLayer(theme: Theme, z_index: i32) -> impl IntoView {
	let lantern = &theme.lantern;
	let body_style = format!(
		"width: {w}px; height: {h}px; border-radius: 40% 40% 45% 45%; \
		 background: radial-gradient(circle at 50% 35%, {hi}, {body}); \
		 box-shadow: 0 0 {g}px {glow};",
		w = lantern.width,
		h = lantern.width * 1.3,
		hi = lantern.body.lighten(0.5).to_css(),
		body = lantern.body.to_css(),
		g = lantern.width,
		glow = lantern.glow.to_css(),
	);
	let css = format!(
		"{}.ambient-lantern {{ position: absolute; bottom: 0; opacity: 0; will-change: transform, opacity; }}\n",
		keyframes_css()
	);
	let lanterns = Lantern::reference_set();
	info!("ambient-fx: {} lanterns mounted", lanterns.len());

	view! {
		<div class="ambient-lanterns" aria-hidden="true" style=layer_style(z_index)>
			<style>{css}</style>
			{lanterns
				.into_iter()
				.map(|l| {
					view! {
						<div class="ambient-lantern" style=l.rise_style()>
							<div style=l.sway_style()>
								<div class="ambient-lantern-body" style=body_style.clone() />
							</div>
						</div>
					}
				})
				.collect_view()}
		</div>
	}
}
