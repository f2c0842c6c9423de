//! Echoes of Blue entry point
//!
//! Headless driver: runs the autopilot at the fixed 60 Hz cadence, logs the
//! session, and prints the final HUD as JSON. A windowed front end consumes
//! `FrameView` the same way.
//!
//! Usage: `echoes-of-blue [frames] [seed]`, optional `ECHOES_TUNING=<file.json>`.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use echoes_of_blue::consts::*;
    use echoes_of_blue::sim::{GameEvent, GameState, TickInput, tick};
    use echoes_of_blue::{FixedStep, FrameView, Tuning};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Echoes of Blue (headless) starting...");

    let mut args = std::env::args().skip(1);
    let frames: u64 = args.next().map(|a| a.parse::<u64>()).transpose()?.unwrap_or(60 * FPS as u64);
    let seed: u64 = args.next().map(|a| a.parse::<u64>()).transpose()?.unwrap_or(0x0EC0_B10E);

    let tuning = match std::env::var("ECHOES_TUNING") {
        Ok(path) => {
            log::info!("Loading tuning from {path}");
            Tuning::from_json(&std::fs::read_to_string(&path)?)?
        }
        Err(_) => Tuning::default(),
    };

    let mut state = GameState::with_tuning(seed, tuning);
    let mut clock = FixedStep::default();
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    log::info!("Running {frames} frames with seed {seed}");

    let mut ticks = 0u64;
    while ticks < frames {
        for _ in 0..clock.advance(SIM_DT) {
            tick(&mut state, &input);
            ticks += 1;

            for event in &state.events {
                match event {
                    GameEvent::TrickScored { trick, points, combo } => {
                        log::info!("[{}] {trick} +{points} (x{combo})", state.frame);
                    }
                    GameEvent::LandingBonus { points } => {
                        log::info!("[{}] Clean entry +{points}", state.frame);
                    }
                    other => log::debug!("[{}] {other:?}", state.frame),
                }
            }
            if ticks >= frames {
                break;
            }
        }
    }

    let view = FrameView::capture(&state);
    log::info!(
        "Done: score {} (best combo x{}), {} live particles",
        view.hud.score,
        view.hud.best_combo,
        view.particles.len()
    );
    println!("{}", serde_json::to_string_pretty(&view.hud)?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web front end drives the library directly
}
