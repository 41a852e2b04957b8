//! Deadline trigger for periodic activities
//!
//! The reusable primitive under every periodic activity in the control loop:
//! a stored "next due" timestamp plus a period. Evaluation is wraparound-safe
//! and mutates the deadline in place, so one trigger fires exactly once per
//! elapsed whole period over any sequence of calls with non-decreasing time,
//! including across the `u32` clock wrap.

use std::time::Duration;

use super::ticks::Ticks;

/// Fires once every `period`, measured against a caller-supplied clock.
///
/// Created once per periodic activity at startup; the first firing is due one
/// period after creation.
#[derive(Debug, Clone)]
pub struct DeadlineTrigger {
    next_due: Ticks,
    period_ms: u32,
}

impl DeadlineTrigger {
    /// Create a trigger whose first deadline is `period` after `now`.
    ///
    /// # Panics
    ///
    /// Panics if `period` truncates to zero milliseconds or exceeds
    /// `i32::MAX` milliseconds. Both are programming errors: a zero period
    /// fires on every pass, and a longer period breaks the signed wraparound
    /// comparison.
    pub fn new(now: Ticks, period: Duration) -> Self {
        let period_ms = period.as_millis() as u32;
        assert!(
            period_ms > 0 && period_ms <= i32::MAX as u32,
            "trigger period must be within 1ms..=i32::MAX ms"
        );

        Self {
            next_due: now.wrapping_add(period_ms),
            period_ms,
        }
    }

    /// The configured period in milliseconds.
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// The next deadline.
    pub fn next_due(&self) -> Ticks {
        self.next_due
    }

    /// Report whether the deadline has passed, advancing it by exactly one
    /// period when it has.
    ///
    /// Called frequently this fires once per elapsed period. After a long gap
    /// it fires on every call until the deadline catches up with `now`, so
    /// the cumulative firing count still matches the elapsed whole periods.
    /// Use [`evaluate_coalescing`](Self::evaluate_coalescing) where that
    /// catch-up burst is unwanted.
    pub fn evaluate(&mut self, now: Ticks) -> bool {
        if !now.has_reached(self.next_due) {
            return false;
        }
        self.next_due = self.next_due.wrapping_add(self.period_ms);
        true
    }

    /// Report whether the deadline has passed, realigning it to the first
    /// deadline strictly in the future.
    ///
    /// Fires at most once per call regardless of how many periods elapsed
    /// since the last evaluation. A caller stalled for several periods
    /// resumes at the configured rate instead of bursting, which is how the
    /// frame cycle enforces its maximum capture rate.
    pub fn evaluate_coalescing(&mut self, now: Ticks) -> bool {
        let behind = now.since(self.next_due);
        if behind < 0 {
            return false;
        }
        // Skip every missed period in one step, landing strictly after now.
        let missed = behind as u32 / self.period_ms + 1;
        self.next_due = self.next_due.wrapping_add(missed * self.period_ms);
        true
    }
}
