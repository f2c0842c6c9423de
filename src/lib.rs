//! Echoes of Blue - a dolphin tank arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (creature physics, tricks, scoring, particles)
//! - `tuning`: Data-driven game balance
//! - `view`: Read-only per-frame snapshot for the presentation layer
//! - `clock`: Fixed timestep accumulator

pub mod clock;
pub mod sim;
pub mod tuning;
pub mod view;

pub use clock::FixedStep;
pub use tuning::{Tuning, TuningError};
pub use view::FrameView;

use std::f32::consts::{PI, TAU};

/// Game configuration constants
pub mod consts {
    /// Target frame rate; all physics constants are expressed per frame
    pub const FPS: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / FPS as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest wall-clock delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DELTA: f32 = 0.1;

    /// Tank dimensions (world units, y grows downward)
    pub const TANK_WIDTH: f32 = 1400.0;
    pub const TANK_HEIGHT: f32 = 800.0;
    /// Water surface height (55% down the tank)
    pub const WATER_LEVEL: f32 = TANK_HEIGHT * 0.55;
    /// Distance kept between the creature and the side walls / floor
    pub const TANK_MARGIN: f32 = 60.0;

    /// Creature spawn depth below the surface
    pub const SPAWN_DEPTH: f32 = 100.0;
}

/// Wrap an angle into (-π, π]
///
/// Used for per-frame rotation deltas, so a jump across the ±π seam reads as
/// a small step instead of a full turn.
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    PI - (PI - angle).rem_euclid(TAU)
}

/// Normalize an angle into [0, 2π)
#[inline]
pub fn positive_angle(angle: f32) -> f32 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU { 0.0 } else { a }
}
