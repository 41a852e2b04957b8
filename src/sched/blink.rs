//! Status LED blink generator
//!
//! A two-phase timed toggle that gives the device a visible heartbeat
//! independent of what every other activity costs. The generator catches up
//! fully to the current time on every tick, emitting each intermediate
//! toggle, so the LED's average duty cycle stays at
//! `high / (high + low)` even when the control loop was blocked for a while.

use std::time::Duration;

use crate::runtime::StatusLed;

use super::ticks::Ticks;

/// Generates the status-LED waveform from repeated [`tick`](Self::tick) calls.
///
/// The pattern can be reconfigured live with
/// [`set_pattern`](Self::set_pattern) without resetting phase alignment,
/// which is how the device switches between its "degraded" and "normal"
/// blink signatures.
#[derive(Debug, Clone)]
pub struct BlinkPattern {
    next_toggle: Ticks,
    is_high: bool,
    high_ms: u32,
    low_ms: u32,
}

impl BlinkPattern {
    /// Create a generator that starts low and toggles high at `now`.
    ///
    /// # Panics
    ///
    /// Panics if either phase duration truncates to zero milliseconds; a
    /// zero-length phase would spin the catch-up loop forever.
    pub fn new(now: Ticks, high: Duration, low: Duration) -> Self {
        let (high_ms, low_ms) = phase_millis(high, low);

        Self {
            next_toggle: now,
            is_high: false,
            high_ms,
            low_ms,
        }
    }

    /// Reconfigure the phase durations without resetting phase alignment.
    pub fn set_pattern(&mut self, high: Duration, low: Duration) {
        let (high_ms, low_ms) = phase_millis(high, low);
        self.high_ms = high_ms;
        self.low_ms = low_ms;
    }

    /// Current output level.
    pub fn is_high(&self) -> bool {
        self.is_high
    }

    /// Catch up to `now`, driving `led` through every toggle that should
    /// have happened since the last call.
    ///
    /// After a flip the next deadline advances by the duration of the *new*
    /// phase, so the toggle schedule is identical whether this is called
    /// every millisecond or twice an hour.
    pub fn tick<L: StatusLed>(&mut self, now: Ticks, led: &mut L) {
        while now.has_reached(self.next_toggle) {
            self.is_high = !self.is_high;
            led.set(self.is_high);
            let phase_ms = if self.is_high {
                self.high_ms
            } else {
                self.low_ms
            };
            self.next_toggle = self.next_toggle.wrapping_add(phase_ms);
        }
    }
}

fn phase_millis(high: Duration, low: Duration) -> (u32, u32) {
    let high_ms = high.as_millis() as u32;
    let low_ms = low.as_millis() as u32;
    assert!(
        high_ms > 0 && low_ms > 0,
        "blink phases must be at least 1ms"
    );
    (high_ms, low_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingLed {
        levels: Vec<bool>,
    }

    impl StatusLed for RecordingLed {
        fn set(&mut self, level: bool) {
            self.levels.push(level);
        }
    }

    fn pattern(high_ms: u64, low_ms: u64) -> BlinkPattern {
        BlinkPattern::new(
            Ticks::from_millis(0),
            Duration::from_millis(high_ms),
            Duration::from_millis(low_ms),
        )
    }

    #[test]
    fn test_first_tick_goes_high() {
        let mut blink = pattern(100, 300);
        let mut led = RecordingLed::default();

        blink.tick(Ticks::from_millis(0), &mut led);

        assert!(blink.is_high());
        assert_eq!(led.levels, vec![true]);
    }

    #[test]
    fn test_toggle_schedule() {
        let mut blink = pattern(100, 300);
        let mut led = RecordingLed::default();

        // High at 0, low at 100, high again at 400.
        blink.tick(Ticks::from_millis(0), &mut led);
        blink.tick(Ticks::from_millis(99), &mut led);
        assert!(blink.is_high());

        blink.tick(Ticks::from_millis(100), &mut led);
        assert!(!blink.is_high());

        blink.tick(Ticks::from_millis(399), &mut led);
        assert!(!blink.is_high());

        blink.tick(Ticks::from_millis(400), &mut led);
        assert!(blink.is_high());

        assert_eq!(led.levels, vec![true, false, true]);
    }

    #[test]
    fn test_sparse_ticks_emit_every_toggle() {
        // Two calls across ten whole periods must produce the same toggle
        // sequence as millisecond-resolution ticking.
        let mut sparse = pattern(100, 300);
        let mut sparse_led = RecordingLed::default();
        sparse.tick(Ticks::from_millis(0), &mut sparse_led);
        sparse.tick(Ticks::from_millis(4_000), &mut sparse_led);

        let mut dense = pattern(100, 300);
        let mut dense_led = RecordingLed::default();
        for ms in 0..=4_000 {
            dense.tick(Ticks::from_millis(ms), &mut dense_led);
        }

        assert_eq!(sparse_led.levels, dense_led.levels);
        assert_eq!(sparse.is_high(), dense.is_high());

        // 10 full periods of 2 toggles each, plus the initial rising edge.
        assert_eq!(sparse_led.levels.len(), 21);
        let highs = sparse_led.levels.iter().filter(|l| **l).count();
        assert_eq!(highs, 11);
    }

    #[test]
    fn test_duty_cycle_converges() {
        let mut blink = pattern(100, 300);
        let mut led = RecordingLed::default();

        blink.tick(Ticks::from_millis(0), &mut led);
        blink.tick(Ticks::from_millis(40_000), &mut led);

        // Toggles alternate high/low starting high at t=0; reconstruct the
        // high time from the phase durations.
        let toggles = led.levels.len() as u32;
        let full_periods = toggles / 2;
        let high_ms = full_periods * 100;
        let total_ms = full_periods * 400;

        assert_eq!(high_ms * 4, total_ms);
    }

    #[test]
    fn test_set_pattern_keeps_phase_alignment() {
        let mut blink = pattern(100, 300);
        let mut led = RecordingLed::default();

        blink.tick(Ticks::from_millis(0), &mut led);
        blink.set_pattern(Duration::from_millis(450), Duration::from_millis(50));

        // The pending deadline (100ms into the old high phase) still stands;
        // the next low phase uses the new duration.
        blink.tick(Ticks::from_millis(100), &mut led);
        assert!(!blink.is_high());

        blink.tick(Ticks::from_millis(149), &mut led);
        assert!(!blink.is_high());
        blink.tick(Ticks::from_millis(150), &mut led);
        assert!(blink.is_high());
    }

    #[test]
    fn test_catch_up_across_wrap() {
        let start = Ticks::from_millis(u32::MAX - 150);
        let mut blink = BlinkPattern::new(
            start,
            Duration::from_millis(100),
            Duration::from_millis(100),
        );
        let mut led = RecordingLed::default();

        blink.tick(start, &mut led);
        blink.tick(start.wrapping_add(400), &mut led);

        // Toggles at +0, +100, +200, +300, +400 despite the wrap in between.
        assert_eq!(led.levels, vec![true, false, true, false, true]);
    }
}
