//! Fixed timestep accumulator
//!
//! Converts variable wall-clock frame deltas into a whole number of
//! simulation ticks at the fixed 60 Hz rate.

use crate::consts::{MAX_FRAME_DELTA, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone)]
pub struct FixedStep {
    accumulator: f32,
    step: f32,
    max_substeps: u32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            step,
            max_substeps,
        }
    }

    /// Feed elapsed seconds; returns how many ticks to run this frame
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        let dt = elapsed.clamp(0.0, MAX_FRAME_DELTA);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        substeps
    }
}
