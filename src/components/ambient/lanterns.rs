//! Floating lanterns: closed-form motion, no per-frame state.
//!
//! Each lantern's pose is a pure function of the time since mount and four
//! fixed parameters. The browser applies it through CSS animations whose
//! keyframes are sampled from the same functions, so the layer needs no frame
//! loop and is unaffected by the particle layer pausing.

use std::f64::consts::TAU;
use std::fmt::Write;

/// Fraction of each rise cycle spent fading in (and, mirrored, fading out).
pub const FADE_FRACTION: f64 = 0.1;
/// Vertical travel of one rise cycle, in viewport-height units.
pub const RISE_SPAN_VH: f64 = 120.0;
/// Peak horizontal sway in pixels.
pub const SWAY_AMPLITUDE_PX: f64 = 18.0;
/// Period of one full sway oscillation, in seconds.
pub const SWAY_PERIOD: f64 = 6.0;

/// CSS animation name of the vertical rise.
pub const RISE_ANIMATION: &str = "ambient-lantern-rise";
/// CSS animation name of the horizontal sway.
pub const SWAY_ANIMATION: &str = "ambient-lantern-sway";

/// Number of samples used to approximate the sine sway in keyframes.
const SWAY_SAMPLES: usize = 16;

/// One floating lantern. All fields are fixed at creation.
#[derive(Clone, Debug, PartialEq)]
pub struct Lantern {
	/// Horizontal position as a percentage of viewport width.
	pub horizontal_anchor: f64,
	/// Seconds after mount before the first rise begins.
	pub rise_delay: f64,
	/// Seconds per rise cycle.
	pub rise_duration: f64,
	/// Sway phase in radians.
	pub sway_phase_offset: f64,
}

/// Where a lantern is drawn at a given instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LanternPose {
	/// Anchor, percent of viewport width.
	pub x_percent: f64,
	/// Horizontal offset from the anchor in pixels.
	pub sway_px: f64,
	/// Vertical offset from the bottom edge; negative is up.
	pub rise_vh: f64,
	/// Opacity in `[0, 1]`; zero before the first cycle.
	pub opacity: f64,
}

impl Lantern {
	/// The five lanterns shown by default.
	pub fn reference_set() -> Vec<Lantern> {
		[
			(12.0, 0.0, 18.0, 0.0),
			(30.0, 4.0, 22.0, 1.3),
			(50.0, 8.0, 20.0, 2.6),
			(68.0, 2.0, 24.0, 3.9),
			(86.0, 6.0, 19.0, 5.2),
		]
		.into_iter()
		.map(|(anchor, delay, duration, phase)| Lantern {
			horizontal_anchor: anchor,
			rise_delay: delay,
			rise_duration: duration,
			sway_phase_offset: phase,
		})
		.collect()
	}

	/// Position within the current rise cycle in `[0, 1)`, or `None`
	/// before the first cycle starts.
	pub fn cycle_progress(&self, elapsed: f64) -> Option<f64> {
		let t = elapsed - self.rise_delay;
		if t < 0.0 || self.rise_duration <= 0.0 {
			return None;
		}
		Some((t / self.rise_duration).fract())
	}

	/// Pose `elapsed` seconds after mount.
	pub fn pose(&self, elapsed: f64) -> LanternPose {
		let progress = self.cycle_progress(elapsed);
		LanternPose {
			x_percent: self.horizontal_anchor,
			sway_px: sway_offset(elapsed / SWAY_PERIOD, self.sway_phase_offset),
			rise_vh: progress.map_or(0.0, rise_offset),
			opacity: progress.map_or(0.0, rise_opacity),
		}
	}

	/// Inline style for the rising wrapper element.
	pub fn rise_style(&self) -> String {
		format!(
			"left: {}%; animation: {} {}s linear {}s infinite;",
			self.horizontal_anchor, RISE_ANIMATION, self.rise_duration, self.rise_delay
		)
	}

	/// Inline style for the swaying inner element. A negative delay starts
	/// the oscillation part-way through, which is how the phase is applied.
	pub fn sway_style(&self) -> String {
		let delay = -(self.sway_phase_offset.rem_euclid(TAU) / TAU) * SWAY_PERIOD;
		format!(
			"animation: {} {}s linear {}s infinite;",
			SWAY_ANIMATION, SWAY_PERIOD, delay
		)
	}
}

/// Vertical offset at a point in the rise cycle.
pub fn rise_offset(progress: f64) -> f64 {
	-progress * RISE_SPAN_VH
}

/// Round to the two decimals written into keyframes. Adding `0.0` turns a
/// negative zero into a positive one, which would otherwise print as "-0.00".
fn css_number(value: f64) -> f64 {
	(value * 100.0).round() / 100.0 + 0.0
}

/// Opacity envelope: fade in, hold, fade out.
pub fn rise_opacity(progress: f64) -> f64 {
	if progress < FADE_FRACTION {
		progress / FADE_FRACTION
	} else if progress > 1.0 - FADE_FRACTION {
		(1.0 - progress) / FADE_FRACTION
	} else {
		1.0
	}
	.clamp(0.0, 1.0)
}

/// Sway at `turns` full periods with a phase offset in radians.
pub fn sway_offset(turns: f64, phase: f64) -> f64 {
	SWAY_AMPLITUDE_PX * (TAU * turns + phase).sin()
}

/// `@keyframes` for both animations, sampled from the functions above.
pub fn keyframes_css() -> String {
	let mut css = String::new();

	let _ = writeln!(css, "@keyframes {} {{", RISE_ANIMATION);
	for progress in [0.0, FADE_FRACTION, 1.0 - FADE_FRACTION, 1.0] {
		let _ = writeln!(
			css,
			"  {:.0}% {{ transform: translateY({:.2}vh); opacity: {:.2}; }}",
			progress * 100.0,
			css_number(rise_offset(progress)),
			css_number(rise_opacity(progress))
		);
	}
	css.push_str("}\n");

	let _ = writeln!(css, "@keyframes {} {{", SWAY_ANIMATION);
	for i in 0..=SWAY_SAMPLES {
		let turns = i as f64 / SWAY_SAMPLES as f64;
		let _ = writeln!(
			css,
			"  {:.2}% {{ transform: translateX({:.2}px); }}",
			turns * 100.0,
			css_number(sway_offset(turns, 0.0))
		);
	}
	css.push_str("}\n");

	css
}

#[cfg(test)]
mod tests {
	use super::*;

	fn lantern() -> Lantern {
		Lantern {
			horizontal_anchor: 40.0,
			rise_delay: 2.0,
			rise_duration: 10.0,
			sway_phase_offset: 0.0,
		}
	}

	#[test]
	fn reference_set_has_five_distinct_anchors() {
		let set = Lantern::reference_set();
		assert_eq!(set.len(), 5);
		for (i, a) in set.iter().enumerate() {
			assert!((0.0..=100.0).contains(&a.horizontal_anchor));
			assert!(a.rise_duration > 0.0);
			for b in &set[i + 1..] {
				assert_ne!(a.horizontal_anchor, b.horizontal_anchor);
			}
		}
	}

	#[test]
	fn invisible_before_delay() {
		let pose = lantern().pose(1.5);
		assert_eq!(pose.opacity, 0.0);
		assert_eq!(pose.rise_vh, 0.0);
	}

	#[test]
	fn fades_in_holds_and_fades_out() {
		let l = lantern();
		assert!((l.pose(2.5).opacity - 0.5).abs() < 1e-9);
		assert_eq!(l.pose(7.0).opacity, 1.0);
		assert!((l.pose(11.5).opacity - 0.5).abs() < 1e-9);
		assert!(l.pose(11.99).opacity < 0.05);
	}

	#[test]
	fn rise_is_periodic() {
		let l = lantern();
		let a = l.pose(5.0);
		let b = l.pose(15.0);
		assert!((a.rise_vh - b.rise_vh).abs() < 1e-9);
		assert!((a.opacity - b.opacity).abs() < 1e-9);
		assert!((a.rise_vh + 36.0).abs() < 1e-9);
	}

	#[test]
	fn pose_is_deterministic() {
		let l = Lantern::reference_set()[3].clone();
		assert_eq!(l.pose(123.456), l.pose(123.456));
	}

	#[test]
	fn sway_is_independent_of_rise() {
		let mut early = lantern();
		early.rise_delay = 0.0;
		let late = lantern();
		assert_eq!(early.pose(1.0).sway_px, late.pose(1.0).sway_px);
		assert!(early.pose(0.0).sway_px.abs() < 1e-9);
		assert!((early.pose(SWAY_PERIOD / 4.0).sway_px - SWAY_AMPLITUDE_PX).abs() < 1e-9);
	}

	#[test]
	fn anchor_never_moves() {
		let l = lantern();
		for t in [0.0, 3.0, 9.0, 100.0] {
			assert_eq!(l.pose(t).x_percent, 40.0);
		}
	}

	#[test]
	fn sway_delay_encodes_phase() {
		let mut l = lantern();
		l.sway_phase_offset = TAU / 4.0;
		let style = l.sway_style();
		assert!(style.contains(&format!("{}s", -SWAY_PERIOD / 4.0)));
		assert!(style.contains(SWAY_ANIMATION));
	}

	#[test]
	fn keyframes_match_envelope() {
		let css = keyframes_css();
		assert!(css.contains("@keyframes ambient-lantern-rise"));
		assert!(css.contains("@keyframes ambient-lantern-sway"));
		assert!(css.contains("0% { transform: translateY(0.00vh); opacity: 0.00; }"));
		assert!(css.contains("10% { transform: translateY(-12.00vh); opacity: 1.00; }"));
		assert!(css.contains("100% { transform: translateY(-120.00vh); opacity: 0.00; }"));
		assert!(css.contains("25.00% { transform: translateX(18.00px); }"));
	}

	#[test]
	fn keyframes_never_print_negative_zero() {
		let css = keyframes_css();
		assert!(!css.contains("-0.00"), "{}", css);
		assert!(css.contains("100.00% { transform: translateX(0.00px); }"));
		assert!(rise_offset(0.0).is_sign_negative());
	}

	#[test]
	fn rise_style_uses_parameters() {
		let style = lantern().rise_style();
		assert_eq!(
			style,
			"left: 40%; animation: ambient-lantern-rise 10s linear 2s infinite;"
		);
	}
}
