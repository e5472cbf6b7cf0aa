//! Frame scheduling and lifecycle for the particle layer.
//!
//! The scheduler is an explicit state machine:
//!
//! ```text
//! Uninitialized ──mount/resize──▶ Running ◀──visible── Paused
//!        │                           │ ──hidden──────────▶ │
//!        └──────────── teardown ─────┴────────────────────┴──▶ TornDown
//! ```
//!
//! All host interaction (frame requests, listeners, the drawing surface, the
//! clock) goes through [`FrameHost`], so the machine itself is plain data and
//! can be driven by a fake host in tests. The pending frame handle is the
//! cancellation token: it is cancelled before any resource is released, and
//! `on_frame` does nothing unless the phase is `Running`.

use fastrand::Rng;
use log::{debug, info, warn};

use super::particles::ParticlePool;
use super::capability::Capability;
use super::render;
use super::surface::{Surface, SurfaceError};
use super::theme::Color;

/// Identifier returned by the host when a frame callback is registered.
pub type FrameHandle = i32;

/// Everything the scheduler needs from its environment.
pub trait FrameHost {
	type Surface: Surface;

	/// Monotonic clock in milliseconds, same base as frame timestamps.
	fn now(&self) -> f64;
	/// Current viewport size in pixels.
	fn viewport(&self) -> (f64, f64);
	fn acquire_surface(&mut self, width: f64, height: f64) -> Result<Self::Surface, SurfaceError>;
	fn release_surface(&mut self, surface: Self::Surface);
	/// Ask for one frame callback. `None` if the host refused.
	fn request_frame(&mut self) -> Option<FrameHandle>;
	fn cancel_frame(&mut self, handle: FrameHandle);
	/// Start delivering resize and visibility events.
	fn attach_listeners(&mut self);
	fn detach_listeners(&mut self);
}

/// Lifecycle phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	Uninitialized,
	Running,
	Paused,
	TornDown,
}

/// Per-mount settings fixed at construction.
#[derive(Clone, Debug)]
pub struct SchedulerSettings {
	pub color: Color,
	/// Upper clamp for one step, in seconds. `f64::INFINITY` disables it.
	pub max_frame_delta: f64,
	pub seed: u64,
}

/// Owns the surface, the particle pool, and the frame registration.
pub struct Scheduler<H: FrameHost> {
	host: H,
	settings: SchedulerSettings,
	phase: Phase,
	/// Listeners are attached; set on a motion-enabled mount.
	armed: bool,
	budget: usize,
	visible: bool,
	surface: Option<H::Surface>,
	pool: Option<ParticlePool>,
	pending: Option<FrameHandle>,
	last_frame: f64,
}

impl<H: FrameHost> Scheduler<H> {
	pub fn new(host: H, settings: SchedulerSettings) -> Self {
		Self {
			host,
			settings,
			phase: Phase::Uninitialized,
			armed: false,
			budget: 0,
			visible: true,
			surface: None,
			pool: None,
			pending: None,
			last_frame: 0.0,
		}
	}

	pub fn host(&self) -> &H {
		&self.host
	}

	pub fn host_mut(&mut self) -> &mut H {
		&mut self.host
	}

	/// Start the engine if `capability` allows motion. `visible` is the
	/// page visibility at mount time.
	pub fn mount(&mut self, capability: Capability, visible: bool) {
		if self.phase != Phase::Uninitialized || self.armed {
			return;
		}
		if !capability.motion_enabled {
			info!("ambient-fx: reduced motion requested, particle layer disabled");
			return;
		}

		self.budget = capability.particle_budget;
		self.visible = visible;
		self.armed = true;
		self.host.attach_listeners();
		self.try_start();
	}

	fn try_start(&mut self) {
		let (w, h) = self.host.viewport();
		let surface = if w < 1.0 || h < 1.0 {
			Err(SurfaceError::ZeroArea {
				width: w,
				height: h,
			})
		} else {
			self.host.acquire_surface(w, h)
		};
		let surface = match surface {
			Ok(s) => s,
			Err(e) => {
				warn!("ambient-fx: surface unavailable, waiting for resize: {}", e);
				return;
			}
		};

		self.surface = Some(surface);
		self.pool = Some(ParticlePool::new(
			self.budget,
			w,
			h,
			Rng::with_seed(self.settings.seed),
		));
		info!("ambient-fx: started with {} particles at {}x{}", self.budget, w, h);

		if self.visible {
			self.resume();
		} else {
			self.phase = Phase::Paused;
		}
	}

	/// Frame callback. `timestamp` is in milliseconds on the host clock.
	pub fn on_frame(&mut self, timestamp: f64) {
		self.pending = None;
		if self.phase != Phase::Running {
			return;
		}

		let dt = ((timestamp - self.last_frame) / 1000.0).clamp(0.0, self.settings.max_frame_delta);
		self.last_frame = timestamp;

		if let (Some(pool), Some(surface)) = (self.pool.as_mut(), self.surface.as_mut()) {
			pool.advance(dt);
			render::render(surface, pool, self.settings.color);
		}

		self.schedule();
	}

	/// Register the next frame. A host that refuses leaves the loop stalled,
	/// which is recorded as `Paused` so the next visibility event restarts it.
	fn schedule(&mut self) {
		self.pending = self.host.request_frame();
		if self.pending.is_none() {
			warn!("ambient-fx: frame request refused, pausing");
			self.phase = Phase::Paused;
		}
	}

	/// Viewport changed. Retries startup if the surface was unavailable.
	pub fn on_resize(&mut self) {
		if !self.armed || self.phase == Phase::TornDown {
			return;
		}
		if self.phase == Phase::Uninitialized {
			self.try_start();
			return;
		}

		let (w, h) = self.host.viewport();
		debug!("ambient-fx: resize to {}x{}", w, h);
		if let Some(surface) = self.surface.as_mut() {
			surface.set_size(w, h);
		}
		if let Some(pool) = self.pool.as_mut() {
			pool.resize(w, h);
		}
	}

	/// Page visibility changed.
	pub fn on_visibility(&mut self, visible: bool) {
		if !self.armed || self.phase == Phase::TornDown {
			return;
		}
		self.visible = visible;

		match (self.phase, visible) {
			(Phase::Running, false) => {
				self.cancel_pending();
				self.phase = Phase::Paused;
				debug!("ambient-fx: paused");
			}
			(Phase::Paused, true) => {
				self.resume();
				debug!("ambient-fx: resumed");
			}
			_ => {}
		}
	}

	fn resume(&mut self) {
		self.last_frame = self.host.now();
		self.phase = Phase::Running;
		if self.pending.is_none() {
			self.schedule();
		}
	}

	fn cancel_pending(&mut self) {
		if let Some(handle) = self.pending.take() {
			self.host.cancel_frame(handle);
		}
	}

	/// Release everything. Safe to call more than once.
	pub fn teardown(&mut self) {
		if self.phase == Phase::TornDown {
			return;
		}
		self.cancel_pending();
		self.phase = Phase::TornDown;
		if self.armed {
			self.host.detach_listeners();
			self.armed = false;
		}
		if let Some(surface) = self.surface.take() {
			self.host.release_surface(surface);
		}
		self.pool = None;
		info!("ambient-fx: torn down");
	}
}

#[cfg(test)]
impl<H: FrameHost> Scheduler<H> {
	pub fn phase(&self) -> Phase {
		self.phase
	}

	pub fn pool(&self) -> Option<&ParticlePool> {
		self.pool.as_ref()
	}

	pub fn surface(&self) -> Option<&H::Surface> {
		self.surface.as_ref()
	}
}
