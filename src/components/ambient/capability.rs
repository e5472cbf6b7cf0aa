//! One-shot capability check gating and sizing the effect.

use log::debug;

/// Particle budget for handheld devices.
pub const HANDHELD_BUDGET: usize = 50;
/// Particle budget for everything else.
pub const DESKTOP_BUDGET: usize = 100;

const HANDHELD_MARKERS: &[&str] = &[
	"Android",
	"webOS",
	"iPhone",
	"iPad",
	"iPod",
	"BlackBerry",
	"IEMobile",
	"Opera Mini",
	"Mobi",
];

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Host environment signals. `None` means the signal is unavailable.
pub trait CapabilitySource {
	fn prefers_reduced_motion(&self) -> Option<bool>;
	fn user_agent(&self) -> Option<String>;
}

/// Coarse device classification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeviceClass {
	/// Phones and tablets.
	Handheld,
	/// Everything else.
	#[default]
	Desktop,
}

impl DeviceClass {
	/// Classify by user-agent substring.
	pub fn from_user_agent(ua: &str) -> Self {
		if HANDHELD_MARKERS.iter().any(|m| ua.contains(m)) {
			DeviceClass::Handheld
		} else {
			DeviceClass::Desktop
		}
	}

	/// Particle count for this class.
	pub fn particle_budget(self) -> usize {
		match self {
			DeviceClass::Handheld => HANDHELD_BUDGET,
			DeviceClass::Desktop => DESKTOP_BUDGET,
		}
	}
}

/// Result of probing the host once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capability {
	/// False when the user asked for reduced motion; nothing may start.
	pub motion_enabled: bool,
	/// Number of particles to allocate.
	pub particle_budget: usize,
	/// Classification the budget came from.
	pub device: DeviceClass,
}

impl Default for Capability {
	fn default() -> Self {
		Self {
			motion_enabled: true,
			particle_budget: DESKTOP_BUDGET,
			device: DeviceClass::Desktop,
		}
	}
}

/// Read the host signals. Missing signals resolve to "enabled, desktop tier".
pub fn detect(source: &impl CapabilitySource, count_override: Option<usize>) -> Capability {
	let motion_enabled = !source.prefers_reduced_motion().unwrap_or(false);
	let device = source
		.user_agent()
		.map(|ua| DeviceClass::from_user_agent(&ua))
		.unwrap_or_default();
	let particle_budget = count_override.unwrap_or_else(|| device.particle_budget());

	debug!(
		"ambient-fx: capability motion={} device={:?} budget={}",
		motion_enabled, device, particle_budget
	);

	Capability {
		motion_enabled,
		particle_budget,
		device,
	}
}

/// Signals read from the live browser window.
pub struct BrowserSignals;

impl CapabilitySource for BrowserSignals {
	fn prefers_reduced_motion(&self) -> Option<bool> {
		let window = web_sys::window()?;
		let query = window.match_media(REDUCED_MOTION_QUERY).ok()??;
		Some(query.matches())
	}

	fn user_agent(&self) -> Option<String> {
		web_sys::window()?.navigator().user_agent().ok()
	}
}
