//! Cooperative scheduling primitives
//!
//! Everything the control loop needs to decide *when* to run each periodic
//! activity: a wrapping millisecond time domain, a deadline trigger, and the
//! status-LED blink generator built on top of it.
//!
//! The device clock is a `u32` millisecond counter that wraps after roughly
//! 49.7 days. All comparisons in this module go through [`Ticks`], which
//! implements the signed-difference wraparound idiom, so a firing schedule
//! crosses the wrap boundary without a missed or doubled deadline.

pub mod blink;
pub mod ticks;
pub mod trigger;

pub use blink::BlinkPattern;
pub use ticks::Ticks;
pub use trigger::DeadlineTrigger;
