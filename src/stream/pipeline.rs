//! Frame capture pipeline
//!
//! Orchestrates one capture-and-broadcast cycle: admission check, consumer
//! check, capture at the negotiated resolution, fan-out, release. Every exit
//! path is non-fatal; a skipped or failed cycle is simply reattempted at the
//! next trigger firing.

use std::time::{Duration, Instant};

use crate::camera::{Camera, CameraError, Frame, Resolution};
use crate::runtime::Runtime;
use crate::stats::StreamMetrics;
use crate::transport::Transport;

use super::admission::MemoryGate;

/// What one invocation of [`FramePipeline::run_cycle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Free memory was at or below the safety threshold; nothing was
    /// captured.
    SkippedLowMemory {
        /// The sampled free-memory figure.
        free: u64,
    },
    /// No consumer was connected; nothing was captured.
    SkippedIdle,
    /// The camera returned no frame.
    CaptureFailed(CameraError),
    /// A frame was captured and offered to every consumer.
    Delivered {
        /// Consumers that received the frame.
        sent: u32,
        /// Consumers the transport failed to deliver to.
        failed: u32,
        /// Frame payload size in bytes.
        bytes: usize,
        /// Latency of the capture phase.
        capture: Duration,
        /// Latency of the broadcast phase.
        broadcast: Duration,
    },
}

/// The capture-and-broadcast pipeline.
///
/// Owns the admission gate and the streaming metrics; the camera, transport,
/// and runtime collaborators are borrowed per call so the pipeline itself
/// stays free of hardware state.
#[derive(Debug)]
pub struct FramePipeline {
    gate: MemoryGate,
    metrics: StreamMetrics,
}

impl FramePipeline {
    /// Create a pipeline guarded by `gate`.
    pub fn new(gate: MemoryGate) -> Self {
        Self {
            gate,
            metrics: StreamMetrics::new(),
        }
    }

    /// The admission gate.
    pub fn gate(&self) -> &MemoryGate {
        &self.gate
    }

    /// Streaming metrics accumulated so far.
    pub fn metrics(&self) -> &StreamMetrics {
        &self.metrics
    }

    /// Run one capture-and-broadcast cycle.
    ///
    /// The free-memory figure is sampled fresh on every call, immediately
    /// before the admission decision. When admission denies, or no consumer
    /// is connected, the camera is not touched at all. The captured frame is
    /// handed to the transport by reference and dropped before returning;
    /// it is never retained across cycles.
    pub fn run_cycle<C, T, R>(
        &mut self,
        camera: &mut C,
        transport: &mut T,
        runtime: &R,
        resolution: Resolution,
        consumers: u32,
    ) -> CycleOutcome
    where
        C: Camera,
        T: Transport,
        R: Runtime,
    {
        let free = runtime.free_memory();
        if !self.gate.admit(free) {
            self.metrics.record_skip_low_memory();
            tracing::warn!(
                free = free,
                min_free = self.gate.min_free(),
                "low memory, skipping frame cycle"
            );
            return CycleOutcome::SkippedLowMemory { free };
        }

        if consumers == 0 {
            self.metrics.record_skip_idle();
            return CycleOutcome::SkippedIdle;
        }

        let capture_started = Instant::now();
        let frame = match camera.capture(resolution) {
            Ok(frame) => frame,
            Err(error) => {
                self.metrics.record_capture_failure();
                tracing::warn!(resolution = %resolution, error = %error, "capture failed");
                return CycleOutcome::CaptureFailed(error);
            }
        };
        let capture = capture_started.elapsed();

        let broadcast_started = Instant::now();
        let deliveries = transport.send_to_all(frame.data());
        let broadcast = broadcast_started.elapsed();

        let sent = deliveries.iter().filter(|d| d.ok).count() as u32;
        let failed = deliveries.len() as u32 - sent;
        let bytes = frame.len();

        if failed > 0 {
            tracing::warn!(sent = sent, failed = failed, "partial frame delivery");
        }

        tracing::info!(
            capture_us = capture.as_micros() as u64,
            broadcast_us = broadcast.as_micros() as u64,
            bytes = bytes,
            sent = sent,
            free = free,
            "frame cycle"
        );

        self.metrics.record_cycle(sent, failed, bytes, capture, broadcast);

        CycleOutcome::Delivered {
            sent,
            failed,
            bytes,
            capture,
            broadcast,
        }
    }

    /// Serve a one-shot still capture at `resolution`.
    ///
    /// Switches the sensor first; a refused switch is logged and the capture
    /// attempted anyway, since some sensors refuse redundant changes.
    /// Streaming resumes at the negotiated resolution on the next cycle.
    pub fn capture_still<C: Camera>(
        &mut self,
        camera: &mut C,
        resolution: Resolution,
    ) -> Result<Frame, CameraError> {
        if !camera.change_resolution(resolution) {
            tracing::warn!(resolution = %resolution, "could not set still resolution");
        }

        let started = Instant::now();
        let frame = camera.capture(resolution)?;

        self.metrics.record_still();
        tracing::info!(
            width = frame.width(),
            height = frame.height(),
            bytes = frame.len(),
            capture_us = started.elapsed().as_micros() as u64,
            "captured still image"
        );

        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{FakeCamera, FakeRuntime, FakeTransport};

    fn pipeline(min_free: u64) -> FramePipeline {
        FramePipeline::new(MemoryGate::new(min_free))
    }

    #[test]
    fn test_low_memory_denies_before_capture() {
        let mut camera = FakeCamera::new(10_000);
        let mut transport = FakeTransport::with_clients(&[1, 2]);
        let runtime = FakeRuntime::new();
        runtime.set_free_memory(50_000);

        let mut pipeline = pipeline(60_000);
        let outcome =
            pipeline.run_cycle(&mut camera, &mut transport, &runtime, Resolution::VGA, 2);

        assert_eq!(outcome, CycleOutcome::SkippedLowMemory { free: 50_000 });
        assert_eq!(camera.captures(), 0);
        assert!(transport.sent.is_empty());
        assert_eq!(pipeline.metrics().skipped_low_memory, 1);
    }

    #[test]
    fn test_at_threshold_denies() {
        let mut camera = FakeCamera::new(10_000);
        let mut transport = FakeTransport::with_clients(&[1]);
        let runtime = FakeRuntime::new();
        runtime.set_free_memory(60_000);

        let mut pipeline = pipeline(60_000);
        let outcome =
            pipeline.run_cycle(&mut camera, &mut transport, &runtime, Resolution::VGA, 1);

        assert!(matches!(outcome, CycleOutcome::SkippedLowMemory { .. }));
        assert_eq!(camera.captures(), 0);
    }

    #[test]
    fn test_zero_consumers_skips_capture() {
        let mut camera = FakeCamera::new(10_000);
        let mut transport = FakeTransport::with_clients(&[]);
        let runtime = FakeRuntime::new();

        let mut pipeline = pipeline(60_000);
        let outcome =
            pipeline.run_cycle(&mut camera, &mut transport, &runtime, Resolution::VGA, 0);

        assert_eq!(outcome, CycleOutcome::SkippedIdle);
        assert_eq!(camera.captures(), 0);
        assert_eq!(pipeline.metrics().skipped_idle, 1);
    }

    #[test]
    fn test_capture_failure_is_non_fatal() {
        let mut camera = FakeCamera::failing();
        let mut transport = FakeTransport::with_clients(&[1]);
        let runtime = FakeRuntime::new();

        let mut pipeline = pipeline(60_000);
        let outcome =
            pipeline.run_cycle(&mut camera, &mut transport, &runtime, Resolution::VGA, 1);

        assert_eq!(
            outcome,
            CycleOutcome::CaptureFailed(CameraError::CaptureFailed)
        );
        assert!(transport.sent.is_empty());
        assert_eq!(pipeline.metrics().capture_failures, 1);
    }

    #[test]
    fn test_delivery_to_all_consumers() {
        let mut camera = FakeCamera::new(14_000);
        let mut transport = FakeTransport::with_clients(&[1, 2]);
        let runtime = FakeRuntime::new();

        let mut pipeline = pipeline(60_000);
        let outcome =
            pipeline.run_cycle(&mut camera, &mut transport, &runtime, Resolution::VGA, 2);

        match outcome {
            CycleOutcome::Delivered { sent, failed, bytes, .. } => {
                assert_eq!(sent, 2);
                assert_eq!(failed, 0);
                assert_eq!(bytes, 14_000);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        assert_eq!(camera.captures(), 1);
        assert_eq!(camera.last_resolution(), Some(Resolution::VGA));
        assert_eq!(transport.sent, vec![14_000]);
        assert_eq!(pipeline.metrics().frames_captured, 1);
        assert_eq!(pipeline.metrics().frames_sent, 2);
    }

    #[test]
    fn test_partial_delivery_does_not_abort_cycle() {
        let mut camera = FakeCamera::new(8_000);
        let mut transport = FakeTransport::with_clients(&[1, 2, 3]);
        transport.fail_client(2);
        let runtime = FakeRuntime::new();

        let mut pipeline = pipeline(60_000);
        let outcome =
            pipeline.run_cycle(&mut camera, &mut transport, &runtime, Resolution::VGA, 3);

        match outcome {
            CycleOutcome::Delivered { sent, failed, .. } => {
                assert_eq!(sent, 2);
                assert_eq!(failed, 1);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        assert_eq!(pipeline.metrics().delivery_failures, 1);
    }

    #[test]
    fn test_memory_sampled_fresh_each_cycle() {
        let mut camera = FakeCamera::new(5_000);
        let mut transport = FakeTransport::with_clients(&[1]);
        let runtime = FakeRuntime::new();

        let mut pipeline = pipeline(60_000);

        runtime.set_free_memory(30_000);
        let first =
            pipeline.run_cycle(&mut camera, &mut transport, &runtime, Resolution::VGA, 1);
        assert!(matches!(first, CycleOutcome::SkippedLowMemory { .. }));

        // Memory recovered between firings; the next cycle must see it.
        runtime.set_free_memory(200_000);
        let second =
            pipeline.run_cycle(&mut camera, &mut transport, &runtime, Resolution::VGA, 1);
        assert!(matches!(second, CycleOutcome::Delivered { .. }));
    }

    #[test]
    fn test_capture_still_switches_resolution() {
        let mut camera = FakeCamera::new(40_000);

        let mut pipeline = pipeline(60_000);
        let frame = pipeline
            .capture_still(&mut camera, Resolution::SVGA)
            .unwrap();

        assert_eq!(frame.resolution(), Resolution::SVGA);
        assert_eq!(camera.resolution_changes(), vec![Resolution::SVGA]);
        assert_eq!(pipeline.metrics().stills_captured, 1);
    }

    #[test]
    fn test_capture_still_propagates_failure() {
        let mut camera = FakeCamera::failing();

        let mut pipeline = pipeline(60_000);
        let result = pipeline.capture_still(&mut camera, Resolution::SVGA);

        assert_eq!(result.unwrap_err(), CameraError::CaptureFailed);
    }
}
