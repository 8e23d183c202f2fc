//! Fixed-step frame pacing
//!
//! The simulation advances in whole 1/60 s ticks. Wall-clock time from the
//! host loop is accumulated and converted to a tick count; physics itself is
//! never scaled by elapsed time.

use crate::consts::{FRAME_DT, MAX_CATCHUP_STEPS};

/// Longest frame gap honored; anything beyond (tab in background, debugger) is dropped
const MAX_FRAME_TIME: f32 = 0.25;
const FPS_SAMPLES: usize = 60;

#[derive(Debug, Clone)]
pub struct FramePacer {
    accumulator: f32,
    frame_times: [f32; FPS_SAMPLES],
    frame_index: usize,
    samples: usize,
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new()
    }
}

impl FramePacer {
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            frame_times: [0.0; FPS_SAMPLES],
            frame_index: 0,
            samples: 0,
        }
    }

    /// Feed the wall-clock time since the previous frame; returns ticks to run
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        let elapsed = elapsed.clamp(0.0, MAX_FRAME_TIME);

        self.frame_times[self.frame_index] = elapsed;
        self.frame_index = (self.frame_index + 1) % FPS_SAMPLES;
        self.samples = (self.samples + 1).min(FPS_SAMPLES);

        self.accumulator += elapsed;
        let mut steps = 0;
        // Small epsilon so an exact 1/60 s frame is not lost to rounding
        while self.accumulator + 1e-6 >= FRAME_DT && steps < MAX_CATCHUP_STEPS {
            self.accumulator -= FRAME_DT;
            steps += 1;
        }
        if steps == MAX_CATCHUP_STEPS && self.accumulator >= FRAME_DT {
            log::debug!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        self.accumulator = self.accumulator.max(0.0);
        steps
    }

    /// Average frames per second over the last 60 frames
    pub fn fps(&self) -> Option<u32> {
        if self.samples == 0 {
            return None;
        }
        let total: f32 = self.frame_times[..self.samples].iter().sum();
        if total <= 0.0 {
            return None;
        }
        Some((self.samples as f32 / total).round() as u32)
    }

    /// Forget the backlog and FPS history (after the page loses focus)
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
