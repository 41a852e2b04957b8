//! Server configuration

use std::time::Duration;

use crate::camera::Resolution;

/// Configuration for the scheduler loop and streaming pipeline.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Pacing of scheduler passes in the async driver.
    pub pass_interval: Duration,

    /// High phase of the status-LED blink pattern.
    pub blink_high: Duration,

    /// Low phase of the status-LED blink pattern.
    pub blink_low: Duration,

    /// Period of the liveness report.
    pub heartbeat_interval: Duration,

    /// Minimum spacing between frame cycles; frames are never attempted
    /// faster than this, no matter how fast the loop spins.
    pub frame_interval: Duration,

    /// Period of connection housekeeping.
    pub housekeeping_interval: Duration,

    /// Free-memory safety margin below which frame cycles are skipped.
    ///
    /// Covers the worst-case transient allocation of one broadcast (frame
    /// buffer plus per-client send buffers); validate against the hosting
    /// allocator rather than trusting the default.
    pub min_free_memory: u64,

    /// Capture resolution at startup.
    pub initial_resolution: Resolution,

    /// Resolution used for one-shot still captures.
    pub still_resolution: Resolution,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            pass_interval: Duration::from_millis(5),
            blink_high: Duration::from_millis(50),
            blink_low: Duration::from_millis(950),
            heartbeat_interval: Duration::from_secs(10),
            frame_interval: Duration::from_millis(100),
            housekeeping_interval: Duration::from_secs(1),
            min_free_memory: 64 * 1024,
            initial_resolution: Resolution::VGA,
            still_resolution: Resolution::SVGA,
        }
    }
}

impl ServerConfig {
    /// Set the blink pattern (high phase, low phase).
    pub fn blink_pattern(mut self, high: Duration, low: Duration) -> Self {
        self.blink_high = high.max(Duration::from_millis(1));
        self.blink_low = low.max(Duration::from_millis(1));
        self
    }

    /// Set the liveness report period.
    pub fn heartbeat_interval(mut self, period: Duration) -> Self {
        self.heartbeat_interval = period.max(Duration::from_millis(1));
        self
    }

    /// Set the minimum spacing between frame cycles.
    pub fn frame_interval(mut self, period: Duration) -> Self {
        self.frame_interval = period.max(Duration::from_millis(1));
        self
    }

    /// Set the housekeeping period.
    pub fn housekeeping_interval(mut self, period: Duration) -> Self {
        self.housekeeping_interval = period.max(Duration::from_millis(1));
        self
    }

    /// Set the free-memory safety margin in bytes.
    pub fn min_free_memory(mut self, bytes: u64) -> Self {
        self.min_free_memory = bytes;
        self
    }

    /// Set the capture resolution at startup.
    pub fn initial_resolution(mut self, resolution: Resolution) -> Self {
        self.initial_resolution = resolution;
        self
    }

    /// Set the one-shot still capture resolution.
    pub fn still_resolution(mut self, resolution: Resolution) -> Self {
        self.still_resolution = resolution;
        self
    }
}
