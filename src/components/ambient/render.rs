//! Full clear-and-redraw of the particle pool.

use super::particles::ParticlePool;
use super::surface::Surface;
use super::theme::Color;

/// Draw every particle as a disc in `color`, with the particle's own
/// opacity as alpha. Zero-area surfaces are left untouched.
pub fn render(surface: &mut impl Surface, pool: &ParticlePool, color: Color) {
	let (w, h) = surface.size();
	if w <= 0.0 || h <= 0.0 {
		return;
	}

	surface.clear();
	for p in pool.particles() {
		surface.fill_disc(p.x, p.y, p.radius, color.with_alpha(p.opacity));
	}
}
