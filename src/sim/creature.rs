//! The player's dolphin
//!
//! Two physics regimes selected by `submerged`:
//! - Swimming: steer + thrust along the heading, heavy drag, speed cap
//! - Airborne: spin input for tricks, gravity, light air drag
//!
//! Angles use screen convention (y grows downward), so an angle of π/2 points
//! the nose straight down and positive spin is a front flip.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::tick::TickInput;
use super::tricks::{RotationTracker, Trick};
use crate::positive_angle;
use crate::tuning::Tuning;

/// Something the creature did this frame that the rest of the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreatureEvent {
    /// A new full turn completed while airborne
    TrickCompleted(Trick),
    /// Fell back through the surface
    WaterEntry { clean: bool },
}

/// Heading (radians, screen convention) that counts as nose-down
pub const NOSE_DOWN: f32 = FRAC_PI_2;

/// True when `angle` is within `tolerance` of nose-down, for any winding
pub fn is_clean_entry(angle: f32, tolerance: f32) -> bool {
    (positive_angle(angle) - NOSE_DOWN).abs() <= tolerance
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creature {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Render angle (radians), unbounded
    pub angle: f32,
    pub angular_vel: f32,
    pub submerged: bool,
    /// Re-armed once the creature settles deep enough after a launch
    pub can_launch: bool,
    /// Rotation accumulator and tricks for the current airborne phase
    pub tricks: RotationTracker,
    /// Most recent trick, shown while `trick_timer` runs
    pub current_trick: Option<Trick>,
    pub trick_timer: u32,
    /// Swim animation
    pub animation_frame: u32,
    pub tail_wave: f32,
}

impl Creature {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            angle: 0.0,
            angular_vel: 0.0,
            submerged: true,
            can_launch: true,
            tricks: RotationTracker::new(0.0),
            current_trick: None,
            trick_timer: 0,
            animation_frame: 0,
            tail_wave: 0.0,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Unit vector the nose points along
    #[inline]
    pub fn heading(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }

    pub fn is_airborne(&self) -> bool {
        !self.submerged
    }

    /// Try to leap out of the water. Rejected (no state change) unless
    /// submerged and re-armed; launch speed grows with current speed.
    pub fn launch(&mut self, tuning: &Tuning) -> bool {
        if !self.submerged || !self.can_launch {
            return false;
        }

        let speed = self.speed();
        self.vel.y = -(tuning.launch_base + speed * tuning.launch_speed_bonus);
        self.submerged = false;
        self.can_launch = false;
        self.tricks.reset(self.angle);
        log::debug!("Launch at speed {:.2} -> vy {:.2}", speed, self.vel.y);
        true
    }

    /// Advance one frame. Returns at most one event; a water entry that
    /// coincides with a trick frame is reported on the next frame.
    pub fn update(&mut self, input: &TickInput, tuning: &Tuning) -> Option<CreatureEvent> {
        let mut event = if self.submerged {
            self.swim(input, tuning);
            None
        } else {
            self.fly(input, tuning).map(CreatureEvent::TrickCompleted)
        };

        self.pos += self.vel;
        self.animate();

        if self.submerged {
            if self.pos.y < tuning.water_level - tuning.surfacing_height {
                self.surface();
            }
        } else if event.is_none() && self.vel.y > 0.0 && self.pos.y > tuning.water_level {
            event = Some(self.enter_water(tuning));
        }

        self.clamp_to_tank(tuning);

        if self.trick_timer > 0 {
            self.trick_timer -= 1;
            if self.trick_timer == 0 {
                self.current_trick = None;
            }
        }

        event
    }

    fn swim(&mut self, input: &TickInput, tuning: &Tuning) {
        if input.steer_left {
            self.angular_vel -= tuning.swim_turn;
        }
        if input.steer_right {
            self.angular_vel += tuning.swim_turn;
        }

        let heading = self.heading();
        if input.thrust_forward {
            self.vel += heading * tuning.swim_thrust;
        }
        if input.thrust_backward {
            self.vel -= heading * tuning.swim_thrust * tuning.reverse_thrust;
        }

        self.angular_vel *= tuning.swim_angular_damping;
        self.angle += self.angular_vel;

        self.vel *= tuning.water_drag;
        self.vel = self.vel.clamp_length_max(tuning.max_swim_speed);

        if self.vel.y.abs() < tuning.launch_ready_speed
            && self.pos.y > tuning.water_level + tuning.launch_ready_depth
        {
            self.can_launch = true;
        }
    }

    fn fly(&mut self, input: &TickInput, tuning: &Tuning) -> Option<Trick> {
        if input.steer_left {
            self.angular_vel -= tuning.air_steer;
        }
        if input.steer_right {
            self.angular_vel += tuning.air_steer;
        }
        if input.thrust_forward {
            self.angular_vel += tuning.air_flip;
        }
        if input.thrust_backward {
            self.angular_vel -= tuning.air_flip;
        }

        self.angular_vel =
            (self.angular_vel * tuning.air_angular_damping).clamp(-tuning.max_spin, tuning.max_spin);
        self.angle += self.angular_vel;

        let trick = self.tricks.track(self.angle);
        if let Some(trick) = trick {
            log::debug!("Trick: {trick} (rotation {:.2})", self.tricks.total_rotation());
            self.current_trick = Some(trick);
            self.trick_timer = tuning.trick_display_frames;
        }

        self.vel.y += tuning.gravity;
        self.vel.x *= tuning.air_drag;
        trick
    }

    fn enter_water(&mut self, tuning: &Tuning) -> CreatureEvent {
        let clean = is_clean_entry(self.angle, tuning.clean_entry_tolerance);
        self.submerged = true;
        self.vel.x *= tuning.entry_vx_damping;
        self.vel.y *= tuning.entry_vy_damping;
        self.angular_vel = 0.0;
        self.tricks.rebase(self.angle);
        log::debug!(
            "Water entry at {:.2} rad ({}), {} trick(s)",
            positive_angle(self.angle),
            if clean { "clean" } else { "rough" },
            self.tricks.trick_count()
        );
        CreatureEvent::WaterEntry { clean }
    }

    /// Drifted up through the surface without launching
    fn surface(&mut self) {
        self.submerged = false;
        self.tricks.reset(self.angle);
        log::debug!("Surfaced without launch at y {:.1}", self.pos.y);
    }

    fn animate(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
        self.tail_wave = if self.submerged {
            let pace = (self.speed() * 0.2).max(1.0);
            (self.animation_frame as f32 * 0.15 * pace).sin() * 0.15
        } else {
            0.0
        };
    }

    fn clamp_to_tank(&mut self, tuning: &Tuning) {
        self.pos.x = self
            .pos
            .x
            .clamp(tuning.wall_margin, tuning.tank_width - tuning.wall_margin);

        // Open top: a high leap stalls at the ceiling instead of leaving the tank
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.vel.y = self.vel.y.max(0.0);
        }

        let floor = tuning.tank_height - tuning.wall_margin;
        if self.pos.y > floor {
            self.pos.y = floor;
            self.vel.y = -self.vel.y.abs() * tuning.floor_restitution;
        }
    }
}
