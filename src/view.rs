//! Read-only frame snapshot for the presentation layer
//!
//! A renderer (or HUD, or audio layer) captures one `FrameView` per frame and
//! never touches `GameState` directly. The view is plain data, so it can be
//! handed to another thread as a double-buffered snapshot.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{GamePhase, GameState, Particle, Popup};

#[derive(Debug, Clone, Serialize)]
pub struct CreatureView {
    pub pos: Vec2,
    pub angle: f32,
    pub submerged: bool,
    pub tail_wave: f32,
    pub trick_label: Option<String>,
    pub trick_timer: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub size: f32,
    pub rgb: [u8; 3],
    pub glow: bool,
    pub alpha: u8,
}

impl From<&Particle> for ParticleView {
    fn from(p: &Particle) -> Self {
        Self {
            pos: p.pos,
            size: p.size,
            rgb: p.color.rgb(),
            glow: p.glow,
            alpha: p.alpha(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PopupView {
    pub text: String,
    /// 0.0 when shown, 1.0 when gone; drives scale/fade
    pub age: f32,
}

impl From<&Popup> for PopupView {
    fn from(popup: &Popup) -> Self {
        Self {
            text: popup.text.clone(),
            age: popup.age(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HudView {
    pub score: u64,
    pub combo: u32,
    pub best_combo: u32,
    /// Remaining combo time in [0, 1]
    pub combo_fraction: f32,
    pub popup: Option<PopupView>,
}

/// Everything the presentation layer may read for one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameView {
    pub phase: GamePhase,
    pub frame: u64,
    pub water_level: f32,
    pub creature: CreatureView,
    pub particles: Vec<ParticleView>,
    pub hud: HudView,
}

impl FrameView {
    pub fn capture(state: &GameState) -> Self {
        let creature = &state.creature;
        let scoring = &state.scoring;

        Self {
            phase: state.phase,
            frame: state.frame,
            water_level: state.tuning.water_level,
            creature: CreatureView {
                pos: creature.pos,
                angle: creature.angle,
                submerged: creature.submerged,
                tail_wave: creature.tail_wave,
                trick_label: creature.current_trick.map(|t| t.to_string()),
                trick_timer: creature.trick_timer,
            },
            particles: state.particles.iter().map(ParticleView::from).collect(),
            hud: HudView {
                score: scoring.score,
                combo: scoring.combo,
                best_combo: scoring.best_combo,
                combo_fraction: scoring.combo_fraction(&state.tuning),
                popup: scoring.popup.as_ref().map(PopupView::from),
            },
        }
    }
}
