//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `tick` = one 60 Hz frame)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod creature;
pub mod particles;
pub mod scoring;
pub mod state;
pub mod tick;
pub mod tricks;

pub use creature::{Creature, CreatureEvent, is_clean_entry};
pub use particles::{Particle, ParticleColor, ParticleSystem};
pub use scoring::{EntryOutcome, Popup, ScoreState};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use tricks::{FlipKind, RotationTracker, Trick};
