//! Score and combo engine
//!
//! Consumes creature events. Each trick bumps the combo before multiplying,
//! so a chain scores ×1, ×2, ×3... The combo survives landings that had at
//! least one trick, and dies when its timer lapses or a landing had none.

use serde::{Deserialize, Serialize};

use super::tricks::Trick;
use crate::tuning::Tuning;

/// Transient HUD message ("Front Flip x1 +200")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Popup {
    pub text: String,
    pub remaining: u32,
    pub duration: u32,
}

impl Popup {
    /// 0.0 when shown, approaching 1.0 as it expires
    pub fn age(&self) -> f32 {
        if self.duration == 0 {
            return 1.0;
        }
        1.0 - self.remaining as f32 / self.duration as f32
    }
}

/// What a water entry did to the score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Clean entry after tricks
    LandingBonus(u64),
    /// No tricks this phase; `lost` is the combo that was dropped
    ComboBroken { lost: u32 },
    /// Tricks were landed, but not cleanly
    Rough,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u64,
    pub combo: u32,
    /// Frames left before the combo decays
    pub combo_timer: u32,
    pub best_combo: u32,
    pub popup: Option<Popup>,
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score a trick; returns the points awarded
    pub fn on_trick(&mut self, trick: &Trick, tuning: &Tuning) -> u64 {
        self.combo += 1;
        self.best_combo = self.best_combo.max(self.combo);

        let points = trick.base_points() * self.combo as u64;
        self.score += points;
        self.combo_timer = tuning.combo_frames;
        self.show_popup(format!("{trick} +{points}"), tuning);
        points
    }

    /// Score a water entry given how many tricks the airborne phase produced
    pub fn on_water_entry(&mut self, clean: bool, tricks_this_phase: usize, tuning: &Tuning) -> EntryOutcome {
        if tricks_this_phase == 0 {
            return EntryOutcome::ComboBroken {
                lost: self.break_combo(),
            };
        }
        if !clean {
            return EntryOutcome::Rough;
        }

        let bonus = tuning.landing_bonus * self.combo.max(1) as u64;
        self.score += bonus;
        self.combo_timer = tuning.combo_frames;
        self.show_popup(format!("Clean Entry! +{bonus}"), tuning);
        EntryOutcome::LandingBonus(bonus)
    }

    /// Launching fresh (no tricks in the previous phase) drops the combo.
    /// Returns the combo that was lost, if any.
    pub fn on_launch(&mut self, prior_tricks: usize) -> u32 {
        if prior_tricks == 0 {
            self.break_combo()
        } else {
            0
        }
    }

    /// Advance timers one frame. Returns the combo lost to decay, if any.
    pub fn tick(&mut self) -> u32 {
        if let Some(popup) = &mut self.popup {
            popup.remaining = popup.remaining.saturating_sub(1);
            if popup.remaining == 0 {
                self.popup = None;
            }
        }

        if self.combo_timer > 0 {
            self.combo_timer -= 1;
            if self.combo_timer == 0 {
                return self.break_combo();
            }
        }
        0
    }

    /// Remaining combo time in [0, 1] for the HUD bar
    pub fn combo_fraction(&self, tuning: &Tuning) -> f32 {
        (self.combo_timer as f32 / tuning.combo_frames.max(1) as f32).clamp(0.0, 1.0)
    }

    fn break_combo(&mut self) -> u32 {
        let lost = self.combo;
        self.combo = 0;
        lost
    }

    fn show_popup(&mut self, text: String, tuning: &Tuning) {
        self.popup = Some(Popup {
            text,
            remaining: tuning.popup_frames,
            duration: tuning.popup_frames,
        });
    }
}
