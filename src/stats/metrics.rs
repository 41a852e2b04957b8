//! Statistics for the frame-streaming pipeline

use std::time::Duration;

/// Counters and last-cycle figures for the capture/broadcast pipeline.
///
/// Updated by the pipeline as cycles run; read out through the device status
/// surface. Capture and broadcast latencies are tracked separately, each
/// bracketed by its own timestamp pair.
#[derive(Debug, Clone, Default)]
pub struct StreamMetrics {
    /// Frames successfully acquired from the camera (streaming cycles).
    pub frames_captured: u64,
    /// Broadcast rounds performed.
    pub broadcasts: u64,
    /// Per-consumer deliveries that succeeded, summed over all broadcasts.
    pub frames_sent: u64,
    /// Per-consumer deliveries that failed.
    pub delivery_failures: u64,
    /// Cycles skipped because free memory was at or below the threshold.
    pub skipped_low_memory: u64,
    /// Cycles skipped because no consumer was connected.
    pub skipped_idle: u64,
    /// Cycles where the camera returned no frame.
    pub capture_failures: u64,
    /// One-shot still captures served.
    pub stills_captured: u64,
    /// Capture latency of the most recent successful cycle.
    pub last_capture: Option<Duration>,
    /// Broadcast latency of the most recent successful cycle.
    pub last_broadcast: Option<Duration>,
    /// Payload size of the most recent frame, in bytes.
    pub last_frame_bytes: usize,
}

impl StreamMetrics {
    /// Create zeroed metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed capture-and-broadcast cycle.
    pub fn record_cycle(
        &mut self,
        sent: u32,
        failed: u32,
        bytes: usize,
        capture: Duration,
        broadcast: Duration,
    ) {
        self.frames_captured += 1;
        self.broadcasts += 1;
        self.frames_sent += u64::from(sent);
        self.delivery_failures += u64::from(failed);
        self.last_capture = Some(capture);
        self.last_broadcast = Some(broadcast);
        self.last_frame_bytes = bytes;
    }

    /// Record a cycle denied by the memory admission gate.
    pub fn record_skip_low_memory(&mut self) {
        self.skipped_low_memory += 1;
    }

    /// Record a cycle skipped for lack of consumers.
    pub fn record_skip_idle(&mut self) {
        self.skipped_idle += 1;
    }

    /// Record a cycle where capture produced no frame.
    pub fn record_capture_failure(&mut self) {
        self.capture_failures += 1;
    }

    /// Record a served one-shot still capture.
    pub fn record_still(&mut self) {
        self.stills_captured += 1;
    }
}
