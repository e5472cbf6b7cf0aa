//! Ambient visual effects overlay.
//!
//! Two independent, non-interactive layers drawn over page content:
//! - Falling particles simulated on a canvas, time-step integrated and
//!   recycled at the surface edges
//! - Floating lanterns whose motion is a closed-form function of time,
//!   applied through CSS animations
//!
//! Both are gated by a one-shot capability check: a reduced-motion
//! preference disables everything, and handheld devices get a smaller
//! particle budget.
//!
//! # Example
//!
//! ```ignore
//! use ambient_fx::{AmbientEffects, EffectConfig};
//!
//! let config = EffectConfig {
//!     particle_color: Some("#ffe9c4".into()),
//!     ..Default::default()
//! };
//!
//! view! { <AmbientEffects config=config /> }
//! ```

mod capability;
mod component;
mod config;
mod host;
pub mod lanterns;
mod particles;
mod render;
mod scheduler;
mod surface;
mod theme;

pub use capability::{Capability, DeviceClass};
pub use component::{AmbientEffects, LanternLayer, ParticleLayer};
pub use config::EffectConfig;
pub use theme::{Color, LanternStyle, Theme, ThemeName};
