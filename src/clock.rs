//! Render-callback to fixed-tick conversion
//!
//! Animation frames arrive at whatever rate the display runs. The clock
//! accumulates elapsed wall time and releases at most one simulation tick
//! per frame; whole intervals beyond the first are coalesced, the
//! fractional remainder carries over.

use crate::consts::TICK_MS;

#[derive(Debug, Clone)]
pub struct FixedStepClock {
    step_ms: f64,
    last_ms: Option<f64>,
    accumulator: f64,
}

impl Default for FixedStepClock {
    fn default() -> Self {
        Self::new(TICK_MS)
    }
}

impl FixedStepClock {
    pub fn new(step_ms: f64) -> Self {
        Self {
            step_ms,
            last_ms: None,
            accumulator: 0.0,
        }
    }

    /// Pending time below one step
    #[inline]
    pub fn remainder_ms(&self) -> f64 {
        self.accumulator
    }

    /// Feed a frame timestamp. Returns true if a tick should run.
    ///
    /// The first call only records the baseline. While `gated` the
    /// baseline keeps moving but no time accumulates.
    pub fn advance(&mut self, now_ms: f64, gated: bool) -> bool {
        let Some(last) = self.last_ms.replace(now_ms) else {
            return false;
        };

        if gated {
            self.accumulator = 0.0;
            return false;
        }

        // Timestamps can jitter backwards across tab switches
        self.accumulator += (now_ms - last).max(0.0);
        if self.accumulator < self.step_ms {
            return false;
        }

        self.accumulator %= self.step_ms;
        true
    }

    /// Forget the baseline; the next frame starts counting afresh
    pub fn reset_baseline(&mut self) {
        self.last_ms = None;
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_ticks(clock: &mut FixedStepClock, frame_ms: f64, frames: usize) -> usize {
        (0..=frames)
            .filter(|&i| clock.advance(1000.0 + i as f64 * frame_ms, false))
            .count()
    }

    #[test]
    fn test_first_frame_is_baseline() {
        let mut clock = FixedStepClock::default();
        assert!(!clock.advance(5000.0, false));
        assert_eq!(clock.remainder_ms(), 0.0);
    }

    #[test]
    fn test_60hz_display_ticks_every_frame() {
        let mut clock = FixedStepClock::new(10.0);
        assert_eq!(count_ticks(&mut clock, 10.0, 50), 50);
    }

    #[test]
    fn test_120hz_display_ticks_every_other_frame() {
        let mut clock = FixedStepClock::new(10.0);
        assert_eq!(count_ticks(&mut clock, 5.0, 100), 50);
    }

    #[test]
    fn test_slow_display_coalesces() {
        // 30 Hz display: two nominal intervals per frame, one tick each
        let mut clock = FixedStepClock::new(10.0);
        assert_eq!(count_ticks(&mut clock, 20.0, 30), 30);
    }

    #[test]
    fn test_remainder_carries_over() {
        let mut clock = FixedStepClock::new(10.0);
        clock.advance(0.0, false);
        assert!(!clock.advance(6.0, false));
        assert_eq!(clock.remainder_ms(), 6.0);
        // 6 + 6 = 12 -> tick, 2 left over
        assert!(clock.advance(12.0, false));
        assert_eq!(clock.remainder_ms(), 2.0);
        // 2 + 8 = 10 -> tick
        assert!(clock.advance(20.0, false));
    }

    #[test]
    fn test_long_stall_yields_single_tick() {
        let mut clock = FixedStepClock::new(10.0);
        clock.advance(0.0, false);
        assert!(clock.advance(1005.0, false));
        assert_eq!(clock.remainder_ms(), 5.0);
    }

    #[test]
    fn test_gated_never_ticks() {
        let mut clock = FixedStepClock::new(10.0);
        clock.advance(0.0, false);
        for i in 1..20 {
            assert!(!clock.advance(i as f64 * 50.0, true));
        }
        // Ungating does not release time that passed while gated
        assert!(!clock.advance(955.0, false));
        assert!(clock.advance(960.0, false));
    }

    #[test]
    fn test_backwards_timestamp_is_ignored() {
        let mut clock = FixedStepClock::new(10.0);
        clock.advance(100.0, false);
        assert!(!clock.advance(50.0, false));
        assert_eq!(clock.remainder_ms(), 0.0);
    }
}
