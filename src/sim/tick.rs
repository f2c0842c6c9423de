//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session one 60 Hz frame. Order is fixed:
//! input → creature update → event dispatch (scoring, splashes) → particle
//! update/prune → bubble trail → timers.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::autopilot;
use super::creature::CreatureEvent;
use super::scoring::EntryOutcome;
use super::state::{GameEvent, GamePhase, GameState};

/// Key-state snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub steer_left: bool,
    pub steer_right: bool,
    /// Underwater: swim forward. Airborne: front flip.
    pub thrust_forward: bool,
    /// Underwater: back up. Airborne: back flip.
    pub thrust_backward: bool,
    /// Launch (edge-triggered: set only on the press frame)
    pub launch: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                state.events.push(GameEvent::Paused);
                log::info!("Paused at frame {}", state.frame);
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                state.events.push(GameEvent::Resumed);
                log::info!("Resumed at frame {}", state.frame);
            }
            GamePhase::Title => {}
        }
    }

    match state.phase {
        GamePhase::Title => {
            if input.launch || input.idle_mode {
                state.start();
            }
            return;
        }
        GamePhase::Paused => return,
        GamePhase::Playing => {}
    }

    state.frame += 1;

    let input = if input.idle_mode {
        autopilot::drive(&state.creature, &state.tuning)
    } else {
        *input
    };

    if input.launch {
        try_launch(state);
    }

    if let Some(event) = state.creature.update(&input, &state.tuning) {
        dispatch(state, event);
    }

    state.particles.update(&state.tuning);
    state
        .particles
        .spawn_bubbles(&mut state.rng, &state.creature, &state.tuning);

    let expired = state.scoring.tick();
    if expired > 0 {
        log::debug!("Combo x{expired} expired");
        state.events.push(GameEvent::ComboExpired { lost: expired });
    }
}

fn try_launch(state: &mut GameState) {
    let prior_tricks = state.creature.tricks.trick_count();
    let speed = state.creature.speed();
    if !state.creature.launch(&state.tuning) {
        return;
    }

    let origin = Vec2::new(state.creature.pos.x, state.tuning.water_level);
    let intensity = state.tuning.launch_splash_intensity;
    state
        .particles
        .spawn_splash(&mut state.rng, origin, intensity, &state.tuning);
    state.events.push(GameEvent::Launched { speed });

    let lost = state.scoring.on_launch(prior_tricks);
    if lost > 0 {
        state.events.push(GameEvent::ComboBroken { lost });
    }
}

fn dispatch(state: &mut GameState, event: CreatureEvent) {
    match event {
        CreatureEvent::TrickCompleted(trick) => {
            let points = state.scoring.on_trick(&trick, &state.tuning);
            let combo = state.scoring.combo;
            log::debug!("{trick}: +{points} (combo x{combo}, score {})", state.scoring.score);
            state.events.push(GameEvent::TrickScored {
                trick,
                points,
                combo,
            });
        }
        CreatureEvent::WaterEntry { clean } => {
            let intensity = if clean {
                state.tuning.clean_splash_intensity
            } else {
                state.tuning.entry_splash_intensity
            };
            let origin = Vec2::new(state.creature.pos.x, state.tuning.water_level);
            state
                .particles
                .spawn_splash(&mut state.rng, origin, intensity, &state.tuning);
            state.events.push(GameEvent::WaterEntry { clean });

            let tricks = state.creature.tricks.trick_count();
            match state.scoring.on_water_entry(clean, tricks, &state.tuning) {
                EntryOutcome::LandingBonus(points) => {
                    state.events.push(GameEvent::LandingBonus { points });
                }
                EntryOutcome::ComboBroken { lost } if lost > 0 => {
                    state.events.push(GameEvent::ComboBroken { lost });
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tricks::{FlipKind, RotationTracker, Trick};
    use std::f32::consts::TAU;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start();
        state
    }

    const LAUNCH: TickInput = TickInput {
        steer_left: false,
        steer_right: false,
        thrust_forward: false,
        thrust_backward: false,
        launch: true,
        pause: false,
        idle_mode: false,
    };

    #[test]
    fn test_tick_title_to_playing() {
        let mut state = GameState::new(12345);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Title);
        assert_eq!(state.frame, 0);

        // The starting press does not also launch
        tick(&mut state, &LAUNCH);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.creature.submerged);
        assert_eq!(state.events, vec![GameEvent::Started]);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = playing(12345);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);
        let frozen = state.creature.pos;

        // Paused frames change nothing, even with input held
        tick(&mut state, &LAUNCH);
        assert_eq!(state.creature.pos, frozen);
        assert!(state.creature.submerged);

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.events, vec![GameEvent::Resumed]);
    }

    #[test]
    fn test_launch_splashes_and_reports() {
        let mut state = playing(1);
        tick(&mut state, &LAUNCH);

        assert!(state.creature.is_airborne());
        assert!(matches!(state.events[0], GameEvent::Launched { .. }));
        // 48 launch droplets, each updated once this frame
        assert_eq!(state.particles.len(), 48);

        // Held launch in the air is ignored
        tick(&mut state, &LAUNCH);
        assert!(!state.events.iter().any(|e| matches!(e, GameEvent::Launched { .. })));
    }

    #[test]
    fn test_trickless_landing_breaks_combo() {
        let mut state = playing(2);
        tick(&mut state, &LAUNCH);
        assert!(state.creature.is_airborne());
        // A combo carried over from an earlier phase
        state.scoring.on_trick(
            &Trick {
                kind: FlipKind::Front,
                count: 1,
            },
            &state.tuning,
        );

        let mut broke = false;
        for _ in 0..300 {
            tick(&mut state, &TickInput::default());
            if state.events.contains(&GameEvent::ComboBroken { lost: 1 }) {
                broke = true;
                break;
            }
        }
        assert!(broke);
        assert!(state.creature.submerged);
        assert_eq!(state.scoring.combo, 0);
        assert_eq!(state.scoring.score, 200);
    }

    #[test]
    fn test_flip_scores_through_tick() {
        let mut state = playing(3);
        tick(&mut state, &LAUNCH);

        let flip = TickInput {
            thrust_forward: true,
            ..Default::default()
        };
        let mut scored = Vec::new();
        for _ in 0..20 {
            tick(&mut state, &flip);
            for event in &state.events {
                if let GameEvent::TrickScored { trick, points, combo } = event {
                    scored.push((trick.count, *points, *combo));
                }
            }
        }
        assert!(scored.len() >= 2);
        assert_eq!(scored[0], (1, 200, 1));
        assert_eq!(scored[1], (2, 800, 2));
    }

    #[test]
    fn test_trick_at_the_surface_is_scored_before_entry() {
        let mut state = playing(4);
        tick(&mut state, &LAUNCH);

        // Falling onto the surface with a turn about to complete
        let water = state.tuning.water_level;
        let creature = &mut state.creature;
        creature.pos.y = water - 1.0;
        creature.vel = Vec2::new(0.0, 5.0);
        creature.tricks = RotationTracker::new(0.0);
        for angle in [2.0, 4.0, TAU - 0.05] {
            creature.tricks.track(angle);
        }
        creature.angle = TAU - 0.05;
        creature.angular_vel = 0.2;

        tick(&mut state, &TickInput::default());
        assert!(state.events.contains(&GameEvent::TrickScored {
            trick: Trick {
                kind: FlipKind::Front,
                count: 1
            },
            points: 200,
            combo: 1,
        }));
        assert!(!state.events.iter().any(|e| matches!(e, GameEvent::WaterEntry { .. })));

        tick(&mut state, &TickInput::default());
        assert!(state.events.iter().any(|e| matches!(e, GameEvent::WaterEntry { .. })));
        assert!(!state.events.iter().any(|e| matches!(e, GameEvent::ComboBroken { .. })));
        assert_eq!(state.scoring.combo, 1);
        assert!(state.scoring.score >= 200);
    }

    #[test]
    fn test_combo_carries_into_next_launch() {
        let mut state = playing(6);
        tick(&mut state, &LAUNCH);

        let flip = TickInput {
            thrust_forward: true,
            ..Default::default()
        };
        while state.scoring.combo == 0 {
            tick(&mut state, &flip);
            assert!(state.frame < 60, "no trick scored");
        }
        while !state.creature.submerged {
            tick(&mut state, &TickInput::default());
            assert!(state.frame < 300, "never landed");
        }
        while !state.creature.can_launch {
            tick(&mut state, &TickInput::default());
            assert!(state.frame < 400, "never re-armed");
        }

        let combo = state.scoring.combo;
        assert!(combo > 0, "combo expired before the relaunch");
        assert!(state.creature.tricks.trick_count() > 0);

        tick(&mut state, &LAUNCH);
        assert!(state.events.iter().any(|e| matches!(e, GameEvent::Launched { .. })));
        assert!(!state.events.iter().any(|e| matches!(e, GameEvent::ComboBroken { .. })));
        assert_eq!(state.scoring.combo, combo);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            LAUNCH,
            TickInput {
                thrust_forward: true,
                ..Default::default()
            },
            LAUNCH,
            TickInput {
                steer_left: true,
                thrust_forward: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..40 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.frame, state2.frame);
        assert_eq!(state1.particles.len(), state2.particles.len());
        assert_eq!(state1.creature.pos, state2.creature.pos);
        assert_eq!(state1.scoring.score, state2.scoring.score);
    }
}
