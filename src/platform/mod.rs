//! Platform abstraction layer
//!
//! Decides when fixed simulation ticks are due:
//! - `FrameClock`: wall-time accumulator for a real frame loop
//! - `ManualClock`: advanced by hand, for tests and replays

use std::time::Instant;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Source of fixed-step ticks
pub trait Clock {
    /// Number of simulation ticks due since the last call
    fn due_ticks(&mut self) -> u32;
}

/// Fixed timestep accumulator over real elapsed time
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a frame delta (seconds) and return how many ticks to run
    pub fn step(&mut self, dt: f32) -> u32 {
        // Clamp long stalls (tab switch, breakpoint) instead of replaying them
        let dt = dt.clamp(0.0, 0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }
}

impl Clock for FrameClock {
    fn due_ticks(&mut self) -> u32 {
        let now = Instant::now();
        let dt = self
            .last
            .map(|last| now.duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last = Some(now);
        self.step(dt)
    }
}

/// Clock advanced explicitly
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManualClock {
    pending: u32,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, ticks: u32) {
        self.pending += ticks;
    }

    /// Queue ticks covering `ms` of simulated time
    pub fn advance_ms(&mut self, ms: u64) {
        self.advance(crate::ms_to_ticks(ms));
    }
}

impl Clock for ManualClock {
    fn due_ticks(&mut self) -> u32 {
        std::mem::take(&mut self.pending)
    }
}
