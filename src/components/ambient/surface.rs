//! 2D raster target the particle layer paints into.

use std::f64::consts::PI;

use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::theme::Color;

/// Why a drawing surface could not be acquired.
#[derive(Debug, Error, PartialEq)]
pub enum SurfaceError {
	#[error("viewport has no drawable area ({width}x{height})")]
	ZeroArea { width: f64, height: f64 },
	#[error("2d rendering context unavailable")]
	ContextUnavailable,
}

/// Minimal drawing interface needed by the render pass.
pub trait Surface {
	/// Current pixel dimensions.
	fn size(&self) -> (f64, f64);
	fn set_size(&mut self, width: f64, height: f64);
	/// Erase the whole surface.
	fn clear(&mut self);
	/// Fill a disc centred at `(x, y)`.
	fn fill_disc(&mut self, x: f64, y: f64, radius: f64, color: Color);
}

/// Canvas element with its 2d context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	width: f64,
	height: f64,
}

impl CanvasSurface {
	/// Grab the canvas's 2d context, then size its backing store. A canvas
	/// without a context is left at whatever size it had.
	pub fn acquire(canvas: HtmlCanvasElement, width: f64, height: f64) -> Result<Self, SurfaceError> {
		if width < 1.0 || height < 1.0 {
			return Err(SurfaceError::ZeroArea { width, height });
		}

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
			.ok_or(SurfaceError::ContextUnavailable)?;

		canvas.set_width(width as u32);
		canvas.set_height(height as u32);

		Ok(Self {
			canvas,
			ctx,
			width,
			height,
		})
	}

	/// Shrink the backing store to nothing so the browser can reclaim it.
	pub fn release(self) {
		self.canvas.set_width(0);
		self.canvas.set_height(0);
	}
}

impl Surface for CanvasSurface {
	fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	fn set_size(&mut self, width: f64, height: f64) {
		self.width = width.max(0.0);
		self.height = height.max(0.0);
		self.canvas.set_width(self.width as u32);
		self.canvas.set_height(self.height as u32);
	}

	fn clear(&mut self) {
		self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
	}

	fn fill_disc(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.ctx.set_fill_style_str(&color.to_css());
		self.ctx.begin_path();
		let _ = self.ctx.arc(x, y, radius, 0.0, PI * 2.0);
		self.ctx.fill();
	}
}
