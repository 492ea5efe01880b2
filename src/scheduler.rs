// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Starship Slingshot - Step scheduler

//! Converts host frame callbacks into a fixed simulation cadence, so flight
//! physics no longer depends on the display refresh rate.

#[derive(Debug, Clone)]
pub struct FixedStepScheduler {
    step_ms: f64,
    max_steps: u32,
    accumulator_ms: f64,
}

impl FixedStepScheduler {
    pub fn new(tick_rate_hz: f64, max_steps: u32) -> Self {
        let hz = if tick_rate_hz.is_finite() && tick_rate_hz > 0.0 { tick_rate_hz } else { 60.0 };
        Self {
            step_ms: 1000.0 / hz,
            max_steps: max_steps.max(1),
            accumulator_ms: 0.0,
        }
    }

    /// Number of steps due after `elapsed_ms` of wall time. Time beyond the
    /// catch-up cap is dropped rather than replayed.
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            self.accumulator_ms += elapsed_ms;
        }
        let due = (self.accumulator_ms / self.step_ms).floor();
        let steps = if due >= self.max_steps as f64 { self.max_steps } else { due as u32 };
        if steps == self.max_steps {
            self.accumulator_ms = 0.0;
        } else {
            self.accumulator_ms -= steps as f64 * self.step_ms;
        }
        steps
    }

    pub fn reset(&mut self) {
        self.accumulator_ms = 0.0;
    }
}
