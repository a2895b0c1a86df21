//! Fixed-timestep accumulator
//!
//! Decouples simulation steps from variable frame time. Frame deltas are
//! accumulated and consumed in whole `step` increments; the remainder carries
//! over to the next frame.

/// Slack allowed when comparing the accumulator against the step size.
///
/// Deltas that sum to an exact multiple of the step must yield exactly that
/// many steps regardless of how they were chunked.
const ACCUMULATOR_EPSILON: f64 = 1e-6;

/// Fixed-timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f64,
    accumulator: f64,
}

impl FixedTimestep {
    /// Create an accumulator with the given step size in seconds
    pub fn new(step: f32) -> Self {
        let step = if step.is_finite() && step > 0.0 {
            step
        } else {
            log::warn!("Invalid fixed timestep {}, falling back to 1/60", step);
            1.0 / 60.0
        };

        Self {
            step: step as f64,
            accumulator: 0.0,
        }
    }

    /// Fixed step size in seconds
    pub fn step(&self) -> f32 {
        self.step as f32
    }

    /// Time carried over since the last full step
    pub fn accumulated(&self) -> f32 {
        self.accumulator as f32
    }

    /// Add frame time. Negative or non-finite deltas are ignored.
    pub fn accumulate(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.accumulator += dt as f64;
        }
    }

    /// Consume one step if enough time has accumulated
    pub fn consume(&mut self) -> bool {
        if self.accumulator + ACCUMULATOR_EPSILON >= self.step {
            self.accumulator = (self.accumulator - self.step).max(0.0);
            true
        } else {
            false
        }
    }

    /// Drop any accumulated time
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(1.0 / 60.0)
    }
}
