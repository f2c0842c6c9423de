//! Airborne rotation tracking and trick detection
//!
//! The render angle is left unbounded and is never used for thresholds.
//! Instead each frame's angle change is wrapped into (-π, π] and summed into a
//! separate signed accumulator; every whole turn of that accumulator is a trick.

use std::f32::consts::TAU;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::wrap_angle;

/// Flip direction, from the sign of the accumulated rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipKind {
    /// Positive (nose-down first) rotation
    Front,
    /// Negative rotation
    Back,
}

impl FlipKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlipKind::Front => "Front",
            FlipKind::Back => "Back",
        }
    }
}

/// A completed trick: direction plus the number of full turns so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    pub kind: FlipKind,
    pub count: u32,
}

impl Trick {
    /// Base points before the combo multiplier
    pub fn base_points(&self) -> u64 {
        match self.count {
            0 => 0,
            1 => 200,
            2 => 400,
            3 => 700,
            n => 200 * n as u64,
        }
    }
}

/// Display label, e.g. "Front Flip x2"
impl fmt::Display for Trick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Flip x{}", self.kind.as_str(), self.count)
    }
}

/// Signed rotation accumulator for one airborne phase
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RotationTracker {
    total_rotation: f32,
    last_angle: f32,
    completed: Vec<Trick>,
}

impl RotationTracker {
    pub fn new(angle: f32) -> Self {
        Self {
            total_rotation: 0.0,
            last_angle: angle,
            completed: Vec::new(),
        }
    }

    /// Start a fresh airborne phase (launch): clears tricks and rotation
    pub fn reset(&mut self, angle: f32) {
        self.completed.clear();
        self.rebase(angle);
    }

    /// Zero the accumulator without forgetting this phase's tricks
    pub fn rebase(&mut self, angle: f32) {
        self.total_rotation = 0.0;
        self.last_angle = angle;
    }

    /// Feed this frame's angle; returns a trick when a new full turn completes
    pub fn track(&mut self, angle: f32) -> Option<Trick> {
        self.total_rotation += wrap_angle(angle - self.last_angle);
        self.last_angle = angle;

        let full_turns = (self.total_rotation.abs() / TAU).floor() as u32;
        if full_turns as usize <= self.completed.len() {
            return None;
        }

        let kind = if self.total_rotation > 0.0 {
            FlipKind::Front
        } else {
            FlipKind::Back
        };
        let trick = Trick {
            kind,
            count: full_turns,
        };
        self.completed.push(trick);
        Some(trick)
    }

    pub fn total_rotation(&self) -> f32 {
        self.total_rotation
    }

    pub fn last_angle(&self) -> f32 {
        self.last_angle
    }

    /// Tricks completed during the current airborne phase
    pub fn completed(&self) -> &[Trick] {
        &self.completed
    }

    pub fn trick_count(&self) -> usize {
        self.completed.len()
    }
}
