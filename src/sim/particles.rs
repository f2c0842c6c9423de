//! Splash and bubble particles
//!
//! Purely visual: particles never feed back into gameplay, but they draw from
//! the session RNG so a seeded run stays reproducible frame for frame.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::creature::Creature;
use crate::tuning::Tuning;

/// Particle tint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    Blue,
    White,
}

impl ParticleColor {
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            ParticleColor::Blue => [135, 206, 235],
            ParticleColor::White => [240, 248, 255],
        }
    }
}

/// A single splash droplet or bubble
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: ParticleColor,
    pub glow: bool,
    /// Frames left to live
    pub life: u32,
    pub max_life: u32,
}

impl Particle {
    /// Advance one frame of ballistic motion
    pub fn update(&mut self, gravity: f32, drag: f32) {
        self.pos += self.vel;
        self.vel.y += gravity;
        self.vel.x *= drag;
        self.life = self.life.saturating_sub(1);
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Opacity with a square-root falloff: slow fade early, fast near the end
    pub fn alpha(&self) -> u8 {
        if self.life == 0 || self.max_life == 0 {
            return 0;
        }
        let t = (self.life as f32 / self.max_life as f32).min(1.0);
        (255.0 * t.sqrt()).clamp(0.0, 255.0) as u8
    }
}

/// Unordered collection of live particles
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Burst of droplets fanning upward from `origin`
    pub fn spawn_splash<R: Rng>(
        &mut self,
        rng: &mut R,
        origin: Vec2,
        intensity: f32,
        tuning: &Tuning,
    ) -> usize {
        let count = (tuning.splash_particles as f32 * intensity).floor().max(0.0) as usize;
        self.particles.reserve(count);

        for _ in 0..count {
            let angle = rng.random_range((-FRAC_PI_2 - FRAC_PI_3)..=(-FRAC_PI_2 + FRAC_PI_3));
            let speed = rng.random_range(3.0..=9.0) * intensity;
            let life = rng.random_range(35..=70);
            let color = if rng.random_bool(0.7) {
                ParticleColor::Blue
            } else {
                ParticleColor::White
            };

            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::from_angle(angle) * speed,
                size: rng.random_range(2.0..=7.0),
                color,
                glow: rng.random_bool(0.4),
                life,
                max_life: life,
            });
        }

        log::trace!("Splash x{intensity:.1}: {count} particles at {origin}");
        count
    }

    /// Bubble trail behind a fast swimmer; no-op in the air or when slow
    pub fn spawn_bubbles<R: Rng>(&mut self, rng: &mut R, creature: &Creature, tuning: &Tuning) -> usize {
        if !creature.submerged {
            return 0;
        }
        let speed = creature.speed();
        if speed <= tuning.bubble_min_speed {
            return 0;
        }

        let count = (speed * tuning.bubble_rate).floor() as usize;
        for _ in 0..count {
            let life = rng.random_range(20..=40);
            let trail = rng.random_range(0.5..=1.5);
            let color = if rng.random_bool(0.5) {
                ParticleColor::White
            } else {
                ParticleColor::Blue
            };

            self.particles.push(Particle {
                pos: Vec2::new(
                    creature.pos.x - creature.vel.x * trail,
                    creature.pos.y + rng.random_range(-15.0..=15.0),
                ),
                vel: Vec2::new(rng.random_range(-0.5..=0.5), rng.random_range(-1.5..=-0.5)),
                size: rng.random_range(1.0..=5.0),
                color,
                glow: rng.random_bool(0.3),
                life,
                max_life: life,
            });
        }
        count
    }

    /// Advance every particle one frame, then drop the dead ones
    pub fn update(&mut self, tuning: &Tuning) {
        for particle in self.particles.iter_mut() {
            particle.update(tuning.particle_gravity, tuning.particle_drag);
        }
        self.particles.retain(Particle::is_alive);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
