//! Simulation clock
//!
//! Turns wall-clock frame timestamps into a physics step (every frame) and a
//! simulated-years step on the slower evaluation cadence. Evaluations only see
//! their own frame's years; the frames in between still count toward
//! `simulated_years`.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// What one frame should advance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStep {
    /// Physics step in milliseconds, time scale applied
    pub physics_dt_ms: f32,
    /// This frame's simulated years, on evaluation frames only
    pub evaluation_years: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationClock {
    /// Simulated time in years
    pub simulated_years: f64,
    /// Capped real time spent running, in ms
    pub real_elapsed_ms: f64,
    /// 0..TIME_SCALES.len(); the extra last index means "back to 1x"
    time_scale_index: usize,
    #[serde(skip)]
    last_frame_ms: Option<f64>,
    frame_count: u64,
}

impl SimulationClock {
    pub fn time_scale_index(&self) -> usize {
        self.time_scale_index
    }

    pub fn time_scale(&self) -> f32 {
        TIME_SCALES.get(self.time_scale_index).copied().unwrap_or(1.0)
    }

    /// Step 1x -> 10x -> 100x -> 1x (reset state) -> 1x ...
    pub fn cycle_time_scale(&mut self) -> f32 {
        self.time_scale_index = (self.time_scale_index + 1) % (TIME_SCALES.len() + 1);
        self.time_scale()
    }

    pub fn set_time_scale_index(&mut self, index: usize) {
        self.time_scale_index = index % (TIME_SCALES.len() + 1);
    }

    /// Forget the last frame timestamp so a pause is not counted as elapsed time
    pub fn rearm(&mut self) {
        self.last_frame_ms = None;
    }

    /// Account for a frame presented at `now_ms`
    pub fn advance(&mut self, now_ms: f64) -> FrameStep {
        let delta = match self.last_frame_ms {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_MS),
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);

        let scale = f64::from(self.time_scale());
        let years = delta * scale * YEARS_PER_MS;
        self.simulated_years += years;
        self.real_elapsed_ms += delta;
        self.frame_count += 1;

        let evaluation_years =
            (self.frame_count % EVALUATION_INTERVAL_FRAMES == 0).then_some(years);

        FrameStep {
            physics_dt_ms: (delta * scale) as f32,
            evaluation_years,
        }
    }
}
