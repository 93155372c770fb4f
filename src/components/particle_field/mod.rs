//! Animated particle field component.
//!
//! Renders drifting, fading particles over a gradient background on an HTML
//! canvas with:
//! - Per-particle motion, edge bounces with energy loss and an alpha envelope
//! - A population cap that is refilled a few particles per frame
//! - Frame-rate driven cap adjustment with a dead zone
//! - Periodic flushes that clear the whole field
//! - Arrow-key speed tuning and a toggleable stats overlay
//!
//! The simulation core ([`ParticleField`], [`Particle`], [`AdaptiveController`])
//! has no DOM dependencies and can be driven directly.
//!
//! # Example
//!
//! ```ignore
//! use spoiler_field::{FieldConfig, ParticleFieldCanvas};
//!
//! let config = FieldConfig { max_particles: 800, ..Default::default() };
//!
//! view! { <ParticleFieldCanvas config=config.into() fullscreen=true /> }
//! ```

mod clock;
mod component;
mod config;
mod controller;
mod field;
mod input;
mod particle;
mod random;
mod render;
mod state;
pub mod theme;

pub use clock::FrameClock;
pub use component::ParticleFieldCanvas;
pub use config::FieldConfig;
pub use controller::AdaptiveController;
pub use field::{FLUSH_INTERVAL_MS, FieldParams, ParameterUpdate, ParticleField, SPAWN_PER_TICK};
pub use input::{Controls, KeyState};
pub use particle::{Particle, Range};
pub use random::{RandomSource, RngSource};
pub use render::{Surface, stats_lines};
pub use state::{FieldState, FrameStats, StopSignal};
pub use theme::{Color, Theme};
