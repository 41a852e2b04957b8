//! Runtime collaborator traits
//!
//! The control loop never reads a clock, a heap gauge, or a GPIO directly;
//! it goes through these traits so the whole core can run against simulated
//! hardware in tests.

use crate::sched::Ticks;

/// Clock and memory gauge supplied by the hosting runtime.
///
/// `free_memory` is sampled fresh immediately before every admission
/// decision and must never be cached by implementors: memory conditions
/// change under work (network buffers, filesystem) outside this core's
/// control.
pub trait Runtime {
    /// Current value of the wrapping millisecond uptime counter.
    fn now(&self) -> Ticks;

    /// Bytes of free memory available for transient allocation.
    fn free_memory(&self) -> u64;
}

/// Binary output signal for the status LED.
///
/// Polarity is the implementor's business; the blink generator reports the
/// logical level only.
pub trait StatusLed {
    /// Drive the output to the given logical level.
    fn set(&mut self, level: bool);
}
