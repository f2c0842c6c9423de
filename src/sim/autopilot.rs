//! Idle/demo mode autopilot
//!
//! Produces the key snapshot a player might press: settle deep enough to
//! re-arm the launch, point up and sprint for the surface, launch just below
//! it, front-flip while rising, then steer nose-down for a clean entry.

use std::f32::consts::{FRAC_PI_2, TAU};

use super::creature::{Creature, NOSE_DOWN};
use super::tick::TickInput;
use crate::tuning::Tuning;
use crate::wrap_angle;

/// Depth the autopilot dives to when it is too shallow to re-arm
const SETTLE_DEPTH: f32 = 60.0;
/// Launch once this close to the surface...
const LAUNCH_DEPTH: f32 = 30.0;
/// ...and moving at least this fast
const LAUNCH_SPEED: f32 = 4.0;
/// Heading error that still counts as lined up for thrust
const ALIGN_TOLERANCE: f32 = 0.3;
/// Steering deadband around the target heading
const STEER_DEADBAND: f32 = 0.05;
/// Spin above which the autopilot brakes instead of aiming
const BRAKE_SPIN: f32 = 0.3;

/// Pick this frame's input for `creature`
pub fn drive(creature: &Creature, tuning: &Tuning) -> TickInput {
    if creature.submerged {
        swim(creature, tuning)
    } else {
        fly(creature, tuning)
    }
}

fn swim(creature: &Creature, tuning: &Tuning) -> TickInput {
    let depth = creature.pos.y - tuning.water_level;
    let coast = coast_frames(tuning.swim_angular_damping);

    if !creature.can_launch {
        // Drift until settled; dive first if that would happen too shallow
        if depth >= SETTLE_DEPTH {
            return TickInput::default();
        }
        let (steer_left, steer_right) = steer_toward(creature, NOSE_DOWN, coast);
        return TickInput {
            steer_left,
            steer_right,
            thrust_forward: heading_error(creature.angle, NOSE_DOWN) < ALIGN_TOLERANCE,
            ..Default::default()
        };
    }

    let up = -FRAC_PI_2;
    let (steer_left, steer_right) = steer_toward(creature, up, coast);
    let aligned = heading_error(creature.angle, up) < ALIGN_TOLERANCE;
    TickInput {
        steer_left,
        steer_right,
        thrust_forward: aligned,
        launch: aligned && depth < LAUNCH_DEPTH && creature.speed() > LAUNCH_SPEED,
        ..Default::default()
    }
}

fn fly(creature: &Creature, tuning: &Tuning) -> TickInput {
    let rising = creature.vel.y < 0.0;
    if rising && creature.tricks.total_rotation() < TAU + 0.5 {
        return TickInput {
            thrust_forward: true,
            ..Default::default()
        };
    }

    if creature.angular_vel.abs() > BRAKE_SPIN {
        let forward = creature.angular_vel < 0.0;
        return TickInput {
            steer_left: !forward,
            steer_right: forward,
            thrust_forward: forward,
            thrust_backward: !forward,
            ..Default::default()
        };
    }

    let (steer_left, steer_right) =
        steer_toward(creature, NOSE_DOWN, coast_frames(tuning.air_angular_damping));
    TickInput {
        steer_left,
        steer_right,
        ..Default::default()
    }
}

/// How many frames of current spin remain once input stops (geometric decay)
fn coast_frames(damping: f32) -> f32 {
    damping / (1.0 - damping).max(f32::EPSILON)
}

/// Bang-bang steering against where the spin will coast to
fn steer_toward(creature: &Creature, target: f32, coast: f32) -> (bool, bool) {
    let resting = creature.angle + creature.angular_vel * coast;
    let error = wrap_angle(target - resting);
    (error < -STEER_DEADBAND, error > STEER_DEADBAND)
}

fn heading_error(angle: f32, target: f32) -> f32 {
    wrap_angle(target - angle).abs()
}
