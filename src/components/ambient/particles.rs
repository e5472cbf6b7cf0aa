//! Falling particle pool and its time-based integration step.
//!
//! Particles are recycled rather than destroyed: one that drops below the
//! bottom edge respawns just above the top edge with a new horizontal
//! position, and horizontal motion wraps around the side edges. The pool's
//! cardinality is fixed at construction.

use fastrand::Rng;

/// Per-frame constants were tuned against this update rate.
const BASELINE_FPS: f64 = 60.0;

/// Distance above the top edge where recycled particles reappear.
const RESPAWN_OFFSET: f64 = 10.0;

/// A single falling particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	/// Vertical pixels per baseline frame.
	pub fall_speed: f64,
	/// Horizontal pixels per baseline frame (signed).
	pub drift: f64,
	pub opacity: f64,
}

/// Owns the particles, the bounds they live in, and the RNG used to
/// seed and recycle them.
pub struct ParticlePool {
	particles: Vec<Particle>,
	width: f64,
	height: f64,
	rng: Rng,
}

impl ParticlePool {
	/// Create `count` particles scattered over the surface, staggered
	/// vertically in the band one surface-height above it.
	pub fn new(count: usize, width: f64, height: f64, mut rng: Rng) -> Self {
		let particles = (0..count)
			.map(|_| Particle {
				x: rng.f64() * width,
				y: rng.f64() * height - height,
				radius: 1.0 + rng.f64() * 3.0,
				fall_speed: 0.5 + rng.f64(),
				drift: rng.f64() * 0.5 - 0.25,
				opacity: 0.3 + rng.f64() * 0.5,
			})
			.collect();

		Self {
			particles,
			width,
			height,
			rng,
		}
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	fn has_area(&self) -> bool {
		self.width > 0.0 && self.height > 0.0
	}

	/// Advance every particle by `dt` seconds, then apply wrap and respawn.
	/// Without a drawable area there are no bounds to enforce, so the pool
	/// is frozen rather than integrated.
	pub fn advance(&mut self, dt: f64) {
		if !self.has_area() {
			return;
		}
		let frames = dt * BASELINE_FPS;
		for p in &mut self.particles {
			p.y += p.fall_speed * frames;
			p.x += p.drift * frames;
		}
		self.enforce_bounds();
	}

	/// Adopt new surface bounds. Out-of-range particles are wrapped or
	/// respawned, never dropped, and none are added.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.enforce_bounds();
	}

	fn enforce_bounds(&mut self) {
		if !self.has_area() {
			return;
		}
		let (w, h) = (self.width, self.height);
		let respawn_y = -RESPAWN_OFFSET.min(h / 10.0);

		for p in &mut self.particles {
			if p.y > h {
				p.y = respawn_y;
				p.x = self.rng.f64() * w;
			}
			p.x = wrap(p.x, w);
		}
	}
}

#[cfg(test)]
impl ParticlePool {
	/// Build a pool from explicit particles (bounds are not enforced here).
	pub fn from_particles(particles: Vec<Particle>, width: f64, height: f64, rng: Rng) -> Self {
		Self {
			particles,
			width,
			height,
			rng,
		}
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn bounds(&self) -> (f64, f64) {
		(self.width, self.height)
	}
}

/// Wrap into `[0, width)`. `rem_euclid` can round up to `width` for tiny
/// negative inputs, hence the final check.
fn wrap(x: f64, width: f64) -> f64 {
	let wrapped = x.rem_euclid(width);
	if wrapped >= width { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
	use super::*;

	fn particle(x: f64, y: f64) -> Particle {
		Particle {
			x,
			y,
			radius: 2.0,
			fall_speed: 1.0,
			drift: 0.0,
			opacity: 0.5,
		}
	}

	fn assert_in_bounds(pool: &ParticlePool) {
		let (w, h) = pool.bounds();
		for p in pool.particles() {
			assert!(p.x >= 0.0 && p.x < w, "x out of range: {}", p.x);
			assert!(p.y <= h, "y below surface: {}", p.y);
			assert!(p.y >= -h, "y above stagger band: {}", p.y);
		}
	}

	#[test]
	fn initial_ranges() {
		let pool = ParticlePool::new(500, 800.0, 600.0, Rng::with_seed(1));
		assert_eq!(pool.len(), 500);
		for p in pool.particles() {
			assert!((0.0..800.0).contains(&p.x));
			assert!((-600.0..0.0).contains(&p.y));
			assert!((1.0..4.0).contains(&p.radius));
			assert!((0.5..1.5).contains(&p.fall_speed));
			assert!((-0.25..0.25).contains(&p.drift));
			assert!((0.3..0.8).contains(&p.opacity));
		}
	}

	#[test]
	fn bounds_hold_over_many_steps() {
		let mut pool = ParticlePool::new(200, 320.0, 240.0, Rng::with_seed(7));
		for i in 0..2_000 {
			// Uneven frame pacing, including the odd long stall.
			let dt = if i % 97 == 0 { 0.2 } else { 0.008 + (i % 5) as f64 * 0.004 };
			pool.advance(dt);
			assert_in_bounds(&pool);
		}
	}

	#[test]
	fn respawned_particles_stay_within_top_margin() {
		let mut pool = ParticlePool::new(100, 300.0, 200.0, Rng::with_seed(3));
		// Long enough for every particle to have fallen in at least once.
		for _ in 0..600 {
			pool.advance(1.0 / 60.0);
		}
		let (_, h) = pool.bounds();
		let mut rng = Rng::with_seed(99);
		for _ in 0..600 {
			pool.advance(rng.f64() / 30.0);
			for p in pool.particles() {
				assert!(p.y >= -h / 10.0 && p.y <= h, "y = {}", p.y);
			}
		}
	}

	#[test]
	fn split_step_matches_single_step() {
		let mut a = ParticlePool::new(50, 800.0, 600.0, Rng::with_seed(11));
		let mut b = ParticlePool::new(50, 800.0, 600.0, Rng::with_seed(11));
		a.advance(0.1);
		b.advance(0.05);
		b.advance(0.05);
		for (pa, pb) in a.particles().iter().zip(b.particles()) {
			assert!((pa.y - pb.y).abs() < 1e-9);
		}
	}

	#[test]
	fn motion_scales_with_elapsed_time() {
		let mut pool = ParticlePool::from_particles(
			vec![Particle {
				drift: 0.25,
				..particle(100.0, 0.0)
			}],
			800.0,
			600.0,
			Rng::with_seed(0),
		);
		pool.advance(0.5);
		let p = &pool.particles()[0];
		assert!((p.y - 30.0).abs() < 1e-9);
		assert!((p.x - 107.5).abs() < 1e-9);
	}

	#[test]
	fn falls_off_bottom_and_respawns_at_top() {
		let mut pool = ParticlePool::from_particles(
			vec![particle(50.0, 599.5)],
			800.0,
			600.0,
			Rng::with_seed(0),
		);
		pool.advance(1.0 / 60.0);
		let p = &pool.particles()[0];
		assert_eq!(p.y, -10.0);
		assert!((0.0..800.0).contains(&p.x));
		assert_eq!(p.radius, 2.0);
		assert_eq!(p.opacity, 0.5);
	}

	#[test]
	fn short_surface_respawn_respects_margin() {
		let mut pool =
			ParticlePool::from_particles(vec![particle(5.0, 49.9)], 80.0, 50.0, Rng::with_seed(0));
		pool.advance(1.0 / 60.0);
		assert_eq!(pool.particles()[0].y, -5.0);
	}

	#[test]
	fn drift_wraps_both_sides() {
		let mut pool = ParticlePool::from_particles(
			vec![
				Particle {
					drift: 0.25,
					..particle(799.9, 10.0)
				},
				Particle {
					drift: -0.25,
					..particle(0.1, 10.0)
				},
			],
			800.0,
			600.0,
			Rng::with_seed(0),
		);
		pool.advance(1.0 / 60.0);
		let ps = pool.particles();
		assert!((ps[0].x - 0.15).abs() < 1e-9);
		assert!((ps[1].x - 799.85).abs() < 1e-9);
	}

	#[test]
	fn shrinking_width_remaps_x() {
		let mut pool = ParticlePool::from_particles(
			vec![particle(790.0, 100.0)],
			800.0,
			600.0,
			Rng::with_seed(0),
		);
		pool.resize(400.0, 600.0);
		let x = pool.particles()[0].x;
		assert!((0.0..400.0).contains(&x));
		assert!((x - 390.0).abs() < 1e-9);
		assert_eq!(pool.len(), 1);
	}

	#[test]
	fn shrinking_height_respawns() {
		let mut pool = ParticlePool::from_particles(
			vec![particle(10.0, 500.0), particle(20.0, 100.0)],
			800.0,
			600.0,
			Rng::with_seed(0),
		);
		pool.resize(800.0, 300.0);
		assert_eq!(pool.particles()[0].y, -10.0);
		assert_eq!(pool.particles()[1].y, 100.0);
		assert_eq!(pool.len(), 2);
	}

	#[test]
	fn zero_area_leaves_particles_alone() {
		let mut pool = ParticlePool::new(10, 800.0, 600.0, Rng::with_seed(5));
		let before = pool.particles().to_vec();
		pool.resize(0.0, 600.0);
		assert_eq!(pool.particles(), &before[..]);
		for _ in 0..100 {
			pool.advance(0.1);
		}
		assert_eq!(pool.particles(), &before[..]);
	}

	#[test]
	fn collapsed_surface_keeps_stagger_on_restore() {
		let mut pool = ParticlePool::new(100, 800.0, 600.0, Rng::with_seed(21));
		for _ in 0..600 {
			pool.advance(1.0 / 60.0);
		}
		pool.resize(0.0, 0.0);
		for _ in 0..600 {
			pool.advance(1.0 / 60.0);
		}
		pool.resize(800.0, 600.0);
		assert_in_bounds(&pool);
		let at_respawn = pool.particles().iter().filter(|p| p.y == -10.0).count();
		assert!(at_respawn < 5, "{} particles respawned together", at_respawn);
	}

	#[test]
	fn wrap_never_returns_width() {
		assert_eq!(wrap(-1e-18, 400.0), 0.0);
		assert_eq!(wrap(400.0, 400.0), 0.0);
		assert!((wrap(-10.0, 400.0) - 390.0).abs() < 1e-9);
	}
}
