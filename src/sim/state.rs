//! Session state owned by the game loop
//!
//! Everything the tick mutates lives in `GameState`; nothing is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::creature::Creature;
use super::particles::ParticleSystem;
use super::scoring::ScoreState;
use super::tricks::Trick;
use crate::consts::SPAWN_DEPTH;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the first launch press
    Title,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
}

/// Cues raised during a tick, for audio and UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    Launched { speed: f32 },
    TrickScored { trick: Trick, points: u64, combo: u32 },
    WaterEntry { clean: bool },
    LandingBonus { points: u64 },
    /// Trick-less landing or launch dropped a running combo
    ComboBroken { lost: u32 },
    /// Combo timer ran out
    ComboExpired { lost: u32 },
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Particle RNG
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Gameplay frames simulated (excludes title and paused frames)
    pub frame: u64,
    pub creature: Creature,
    pub particles: ParticleSystem,
    pub scoring: ScoreState,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let spawn = Vec2::new(tuning.tank_width / 2.0, tuning.water_level + SPAWN_DEPTH);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Title,
            frame: 0,
            creature: Creature::new(spawn),
            particles: ParticleSystem::new(),
            scoring: ScoreState::new(),
            events: Vec::new(),
        }
    }

    /// Skip the title screen
    pub fn start(&mut self) {
        if self.phase == GamePhase::Title {
            self.phase = GamePhase::Playing;
            self.events.push(GameEvent::Started);
            log::info!("Session started (seed {})", self.seed);
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Title);
        assert!(state.creature.submerged);
        assert!(state.creature.can_launch);
        assert_eq!(state.creature.pos.x, state.tuning.tank_width / 2.0);
        assert!(state.creature.pos.y > state.tuning.water_level);
        assert!(state.particles.is_empty());
        assert_eq!(state.scoring.score, 0);
    }

    #[test]
    fn test_start_once() {
        let mut state = GameState::new(1);
        state.start();
        state.start();
        assert!(state.is_playing());
        assert_eq!(state.events, vec![GameEvent::Started]);
    }
}
