//! Data-driven game balance
//!
//! Every physics and scoring constant lives here so a session can be retuned
//! from a JSON document without touching the simulation. All rates are per
//! frame at the fixed 60 Hz tick.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors produced while loading tuning overrides
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("Failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Tuning value '{field}' out of range: {value}")]
    OutOfRange { field: &'static str, value: f32 },
}

/// Game balance constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Tank ===
    pub tank_width: f32,
    pub tank_height: f32,
    pub water_level: f32,
    /// Gap kept from the side walls and the floor
    pub wall_margin: f32,
    /// Velocity kept (reversed) when bouncing off the floor
    pub floor_restitution: f32,

    // === Swimming ===
    pub swim_turn: f32,
    pub swim_angular_damping: f32,
    pub swim_thrust: f32,
    /// Fraction of forward thrust applied when backing up
    pub reverse_thrust: f32,
    pub water_drag: f32,
    pub max_swim_speed: f32,
    /// Vertical speed below which the creature counts as settled
    pub launch_ready_speed: f32,
    /// Depth below the surface required before launching is re-armed
    pub launch_ready_depth: f32,
    /// Height above the surface at which a drifting creature goes airborne
    pub surfacing_height: f32,

    // === Flight ===
    pub air_steer: f32,
    pub air_flip: f32,
    pub air_angular_damping: f32,
    /// Spin cap (rad/frame); must stay below π so rotation deltas never alias
    pub max_spin: f32,
    pub gravity: f32,
    pub air_drag: f32,

    // === Launch / entry ===
    pub launch_base: f32,
    /// Extra launch speed per unit of pre-launch speed
    pub launch_speed_bonus: f32,
    pub entry_vx_damping: f32,
    pub entry_vy_damping: f32,
    /// Max distance (rad) from nose-down that still counts as clean
    pub clean_entry_tolerance: f32,
    pub trick_display_frames: u32,

    // === Scoring ===
    pub combo_frames: u32,
    pub popup_frames: u32,
    pub landing_bonus: u64,

    // === Particles ===
    pub splash_particles: u32,
    pub launch_splash_intensity: f32,
    pub entry_splash_intensity: f32,
    pub clean_splash_intensity: f32,
    pub particle_gravity: f32,
    pub particle_drag: f32,
    pub bubble_min_speed: f32,
    /// Bubbles spawned per frame per unit of swim speed
    pub bubble_rate: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tank_width: TANK_WIDTH,
            tank_height: TANK_HEIGHT,
            water_level: WATER_LEVEL,
            wall_margin: TANK_MARGIN,
            floor_restitution: 0.6,

            swim_turn: 0.04,
            swim_angular_damping: 0.85,
            swim_thrust: 0.4,
            reverse_thrust: 0.5,
            water_drag: 0.96,
            max_swim_speed: 10.0,
            launch_ready_speed: 0.5,
            launch_ready_depth: 20.0,
            surfacing_height: 20.0,

            air_steer: 0.08,
            air_flip: 0.10,
            air_angular_damping: 0.96,
            max_spin: 3.0,
            gravity: 0.35,
            air_drag: 0.99,

            launch_base: 16.0,
            launch_speed_bonus: 0.4,
            entry_vx_damping: 0.8,
            entry_vy_damping: 0.4,
            clean_entry_tolerance: 0.5,
            trick_display_frames: 40,

            combo_frames: 150,
            popup_frames: 70,
            landing_bonus: 100,

            splash_particles: 40,
            launch_splash_intensity: 1.2,
            entry_splash_intensity: 1.0,
            clean_splash_intensity: 1.5,
            particle_gravity: 0.15,
            particle_drag: 0.98,
            bubble_min_speed: 2.0,
            bubble_rate: 0.4,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn check(field: &'static str, value: f32, ok: bool) -> Result<(), TuningError> {
            if ok && value.is_finite() {
                Ok(())
            } else {
                Err(TuningError::OutOfRange { field, value })
            }
        }

        check("tank_width", self.tank_width, self.tank_width > 2.0 * self.wall_margin)?;
        check("tank_height", self.tank_height, self.tank_height > self.wall_margin)?;
        check(
            "water_level",
            self.water_level,
            self.water_level > 0.0 && self.water_level < self.tank_height - self.wall_margin,
        )?;
        check("wall_margin", self.wall_margin, self.wall_margin >= 0.0)?;
        check(
            "floor_restitution",
            self.floor_restitution,
            (0.0..=1.0).contains(&self.floor_restitution),
        )?;

        for (field, value) in [
            ("swim_angular_damping", self.swim_angular_damping),
            ("water_drag", self.water_drag),
            ("air_angular_damping", self.air_angular_damping),
            ("air_drag", self.air_drag),
            ("particle_drag", self.particle_drag),
        ] {
            check(field, value, value > 0.0 && value <= 1.0)?;
        }

        check(
            "max_spin",
            self.max_spin,
            self.max_spin > 0.0 && self.max_spin < std::f32::consts::PI,
        )?;
        check("max_swim_speed", self.max_swim_speed, self.max_swim_speed > 0.0)?;
        check(
            "clean_entry_tolerance",
            self.clean_entry_tolerance,
            (0.0..std::f32::consts::FRAC_PI_2).contains(&self.clean_entry_tolerance),
        )?;
        check("combo_frames", self.combo_frames as f32, self.combo_frames > 0)?;
        check("popup_frames", self.popup_frames as f32, self.popup_frames > 0)?;
        Ok(())
    }
}
