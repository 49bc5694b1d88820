//! Fixed-step accumulator that turns frame deltas into engine ticks.

/// Default physics step (~60 Hz).
pub const STEP_MS: u64 = 16;

/// Frame deltas above this are clamped so a stalled terminal does not
/// replay a burst of physics steps.
pub const MAX_FRAME_MS: u64 = 100;

#[derive(Debug, Clone)]
pub struct StepClock {
    step_ms: u64,
    accumulated_ms: u64,
}

impl StepClock {
    /// `step_ms` of zero is treated as one millisecond.
    pub fn new(step_ms: u64) -> Self {
        Self {
            step_ms: step_ms.max(1),
            accumulated_ms: 0,
        }
    }

    pub fn step_ms(&self) -> u64 {
        self.step_ms
    }

    /// Step length in seconds, as passed to `Engine::tick`.
    pub fn step_seconds(&self) -> f64 {
        self.step_ms as f64 / 1000.0
    }

    /// Feed a frame delta and return how many fixed steps are due.
    pub fn advance(&mut self, dt_ms: u64) -> u32 {
        self.accumulated_ms += dt_ms.min(MAX_FRAME_MS);

        let mut steps = 0;
        while self.accumulated_ms >= self.step_ms {
            self.accumulated_ms -= self.step_ms;
            steps += 1;
        }
        steps
    }

    /// Drop any partial step, e.g. while the game is paused.
    pub fn reset(&mut self) {
        self.accumulated_ms = 0;
    }
}

impl Default for StepClock {
    fn default() -> Self {
        Self::new(STEP_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_frames_accumulate() {
        let mut clock = StepClock::default();
        assert_eq!(clock.advance(10), 0);
        assert_eq!(clock.advance(10), 1);
        // 4ms carried over
        assert_eq!(clock.advance(12), 1);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut clock = StepClock::default();
        // 5_000ms stall counts as 100ms = 6 steps (4ms left)
        assert_eq!(clock.advance(5_000), 6);
    }

    #[test]
    fn test_reset_discards_remainder() {
        let mut clock = StepClock::new(16);
        clock.advance(15);
        clock.reset();
        assert_eq!(clock.advance(1), 0);
    }

    #[test]
    fn test_zero_step_is_clamped() {
        let clock = StepClock::new(0);
        assert_eq!(clock.step_ms(), 1);
        assert!((StepClock::new(16).step_seconds() - 0.016).abs() < f64::EPSILON);
    }
}
