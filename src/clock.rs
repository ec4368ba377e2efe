//! Fixed-step clock
//!
//! Accumulates variable frame time and releases whole gameplay steps.
//! Gameplay never sees a partial step; rendering can run at any rate.

use crate::consts::{MAX_STEPS_PER_UPDATE, STEP_SNAP_EPSILON};

#[derive(Debug, Clone)]
pub struct FixedStepClock {
    step: f64,
    accumulator: f64,
    paused: bool,
    total_steps: u64,
}

impl FixedStepClock {
    /// `step_seconds` must be positive
    pub fn new(step_seconds: f64) -> Self {
        debug_assert!(step_seconds > 0.0, "step must be positive");
        Self {
            step: step_seconds,
            accumulator: 0.0,
            paused: false,
            total_steps: 0,
        }
    }

    pub fn step_seconds(&self) -> f64 {
        self.step
    }

    /// Feed `dt` seconds of wall time, returning how many steps are due.
    ///
    /// A frame delta is clamped to one step, so a long stall (debugger,
    /// window drag) never turns into a burst of catch-up moves.
    pub fn advance(&mut self, dt: f64) -> u32 {
        if self.paused || dt.is_nan() || dt <= 0.0 {
            return 0;
        }

        let mut dt = dt.min(self.step);
        if (dt - self.step).abs() < STEP_SNAP_EPSILON {
            dt = self.step;
        }
        self.accumulator += dt;

        let mut steps = 0;
        while self.accumulator >= self.step && steps < MAX_STEPS_PER_UPDATE {
            self.accumulator -= self.step;
            steps += 1;
        }
        // Drop backlog beyond the per-update cap
        if self.accumulator >= self.step {
            self.accumulator %= self.step;
        }

        self.total_steps += steps as u64;
        steps
    }

    /// Forget accumulated time (after a suspend or device loss)
    pub fn reset_elapsed(&mut self) {
        self.accumulator = 0.0;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Fraction of the next step already elapsed (0..1), for render interpolation
    pub fn alpha(&self) -> f64 {
        (self.accumulator / self.step).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_partial_frames() {
        let mut clock = FixedStepClock::new(0.1);
        assert_eq!(clock.advance(0.04), 0);
        assert_eq!(clock.advance(0.04), 0);
        assert_eq!(clock.advance(0.04), 1);
        assert!(clock.alpha() > 0.1 && clock.alpha() < 0.3);
        assert_eq!(clock.total_steps(), 1);
    }

    #[test]
    fn test_one_step_per_exact_frame() {
        let mut clock = FixedStepClock::new(0.1);
        for _ in 0..10 {
            assert_eq!(clock.advance(0.1), 1);
        }
        assert_eq!(clock.total_steps(), 10);
    }

    #[test]
    fn test_long_stall_runs_at_most_one_step() {
        let mut clock = FixedStepClock::new(0.1);
        assert_eq!(clock.advance(5.0), 1);
        assert!(clock.alpha() < 0.5);
    }

    #[test]
    fn test_jitter_is_snapped() {
        let mut clock = FixedStepClock::new(0.1);
        assert_eq!(clock.advance(0.1 - 0.0001), 1);
        assert_eq!(clock.alpha(), 0.0);
    }

    #[test]
    fn test_pause_and_reset() {
        let mut clock = FixedStepClock::new(0.1);
        clock.advance(0.07);
        clock.set_paused(true);
        assert_eq!(clock.advance(0.1), 0);
        clock.set_paused(false);
        clock.reset_elapsed();
        assert_eq!(clock.advance(0.07), 0);
        assert_eq!(clock.advance(0.02), 0);
    }

    #[test]
    fn test_ignores_non_positive_dt() {
        let mut clock = FixedStepClock::new(0.1);
        assert_eq!(clock.advance(0.0), 0);
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.advance(f64::NAN), 0);
        assert_eq!(clock.alpha(), 0.0);
    }
}
