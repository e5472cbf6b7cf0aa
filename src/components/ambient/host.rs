//! Browser implementation of [`FrameHost`].
//!
//! Frame, resize and visibility closures hold only a `Weak` reference back to
//! the scheduler, so the scheduler (which owns this host, which owns the
//! closures) never keeps itself alive.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, Window};

use super::scheduler::{FrameHandle, FrameHost, Scheduler};
use super::surface::{CanvasSurface, SurfaceError};

/// Shared handle to a scheduler driven by the browser.
pub type BrowserScheduler = Rc<RefCell<Scheduler<BrowserHost>>>;

pub struct BrowserHost {
	window: Window,
	document: Document,
	canvas: HtmlCanvasElement,
	frame_cb: Option<Closure<dyn FnMut(f64)>>,
	resize_cb: Option<Closure<dyn FnMut()>>,
	visibility_cb: Option<Closure<dyn FnMut()>>,
}

impl BrowserHost {
	pub fn new(window: Window, document: Document, canvas: HtmlCanvasElement) -> Self {
		Self {
			window,
			document,
			canvas,
			frame_cb: None,
			resize_cb: None,
			visibility_cb: None,
		}
	}

	/// Whether the page is currently shown.
	pub fn page_visible(&self) -> bool {
		!self.document.hidden()
	}

	/// Create the callbacks that feed browser events into `scheduler`.
	/// Must run before `Scheduler::mount`.
	pub fn wire(scheduler: &BrowserScheduler) {
		let weak = Rc::downgrade(scheduler);

		let frame_target = weak.clone();
		let frame_cb: Closure<dyn FnMut(f64)> = Closure::new(move |timestamp: f64| {
			with_scheduler(&frame_target, |s| s.on_frame(timestamp));
		});

		let resize_target = weak.clone();
		let resize_cb: Closure<dyn FnMut()> = Closure::new(move || {
			with_scheduler(&resize_target, |s| s.on_resize());
		});

		let visibility_target = weak;
		let visibility_cb: Closure<dyn FnMut()> = Closure::new(move || {
			with_scheduler(&visibility_target, |s| {
				let visible = s.host().page_visible();
				s.on_visibility(visible);
			});
		});

		let mut s = scheduler.borrow_mut();
		let host = s.host_mut();
		host.frame_cb = Some(frame_cb);
		host.resize_cb = Some(resize_cb);
		host.visibility_cb = Some(visibility_cb);
	}
}

fn with_scheduler(
	target: &Weak<RefCell<Scheduler<BrowserHost>>>,
	f: impl FnOnce(&mut Scheduler<BrowserHost>),
) {
	if let Some(scheduler) = target.upgrade() {
		if let Ok(mut s) = scheduler.try_borrow_mut() {
			f(&mut s);
		}
	}
}

impl FrameHost for BrowserHost {
	type Surface = CanvasSurface;

	fn now(&self) -> f64 {
		self.window.performance().map(|p| p.now()).unwrap_or(0.0)
	}

	fn viewport(&self) -> (f64, f64) {
		let w = self.window.inner_width().ok().and_then(|v| v.as_f64());
		let h = self.window.inner_height().ok().and_then(|v| v.as_f64());
		(w.unwrap_or(0.0), h.unwrap_or(0.0))
	}

	fn acquire_surface(&mut self, width: f64, height: f64) -> Result<CanvasSurface, SurfaceError> {
		CanvasSurface::acquire(self.canvas.clone(), width, height)
	}

	fn release_surface(&mut self, surface: CanvasSurface) {
		surface.release();
	}

	fn request_frame(&mut self) -> Option<FrameHandle> {
		let cb = self.frame_cb.as_ref()?;
		self.window
			.request_animation_frame(cb.as_ref().unchecked_ref())
			.ok()
	}

	fn cancel_frame(&mut self, handle: FrameHandle) {
		let _ = self.window.cancel_animation_frame(handle);
	}

	fn attach_listeners(&mut self) {
		if let Some(ref cb) = self.resize_cb {
			let _ = self
				.window
				.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		if let Some(ref cb) = self.visibility_cb {
			let _ = self
				.document
				.add_event_listener_with_callback("visibilitychange", cb.as_ref().unchecked_ref());
		}
	}

	fn detach_listeners(&mut self) {
		if let Some(ref cb) = self.resize_cb {
			let _ = self
				.window
				.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		if let Some(ref cb) = self.visibility_cb {
			let _ = self.document.remove_event_listener_with_callback(
				"visibilitychange",
				cb.as_ref().unchecked_ref(),
			);
		}
	}
}
