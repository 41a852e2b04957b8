//! Scheduler loop and device server
//!
//! The top-level driver. One [`CameraServer`] owns every piece of mutable
//! state (triggers, blink phase, negotiator, registry, pipeline) plus the
//! hardware collaborators, and multiplexes the four periodic activities from
//! a single control-flow context. Each scheduler pass evaluates the
//! activities in a fixed order; an activity that is not due costs one
//! comparison, and no activity ever blocks another.
//!
//! External events (client lifecycle, inbound messages) enter through an
//! [`EventSender`] and are applied between passes on the same context, which
//! is the system's substitute for locking.

use std::future::Future;
use std::time::Instant;

use tokio::sync::mpsc;

use crate::camera::{Camera, Frame, Resolution, ResolutionNegotiator};
use crate::error::Result;
use crate::registry::{ClientEvent, ClientId, ClientRegistry};
use crate::runtime::{Runtime, StatusLed};
use crate::sched::{BlinkPattern, DeadlineTrigger, Ticks};
use crate::stats::StreamMetrics;
use crate::stream::{FramePipeline, MemoryGate};
use crate::transport::Transport;

use super::config::ServerConfig;
use super::control::{self, ControlCommand};

/// Handle for delivering transport events into the core.
///
/// Cheap to clone; safe to use from the transport's own execution context.
/// Events are queued and applied inside the scheduler's control-flow
/// context, never on the sender's.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<ClientEvent>,
}

impl EventSender {
    /// Queue one event for the core.
    pub fn send(&self, event: ClientEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("core event channel closed, event dropped");
        }
    }
}

/// Read-only snapshot of the device for the external status surface.
#[derive(Debug, Clone)]
pub struct DeviceStatus {
    /// Time since the server was created.
    pub uptime: std::time::Duration,
    /// Number of connected stream consumers.
    pub connected_clients: u32,
    /// The most recently active consumer, if any.
    pub last_active_client: Option<ClientId>,
    /// The active capture resolution.
    pub resolution: Resolution,
    /// Free memory at snapshot time.
    pub free_memory: u64,
    /// Streaming metrics accumulated so far.
    pub metrics: StreamMetrics,
}

/// The cooperative scheduler loop and everything it owns.
pub struct CameraServer<C, T, R, L> {
    config: ServerConfig,

    camera: C,
    transport: T,
    runtime: R,
    led: L,

    blink: BlinkPattern,
    heartbeat: DeadlineTrigger,
    frame_cycle: DeadlineTrigger,
    housekeeping: DeadlineTrigger,

    negotiator: ResolutionNegotiator,
    registry: ClientRegistry,
    pipeline: FramePipeline,

    events_tx: mpsc::UnboundedSender<ClientEvent>,
    events_rx: mpsc::UnboundedReceiver<ClientEvent>,

    started_at: Instant,
}

impl<C, T, R, L> CameraServer<C, T, R, L>
where
    C: Camera,
    T: Transport,
    R: Runtime,
    L: StatusLed,
{
    /// Create a server from its configuration and hardware collaborators.
    ///
    /// All triggers are aligned to the runtime's current time; the first
    /// firing of each activity is due one period after creation.
    pub fn new(config: ServerConfig, camera: C, transport: T, runtime: R, led: L) -> Self {
        let now = runtime.now();
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Self {
            blink: BlinkPattern::new(now, config.blink_high, config.blink_low),
            heartbeat: DeadlineTrigger::new(now, config.heartbeat_interval),
            frame_cycle: DeadlineTrigger::new(now, config.frame_interval),
            housekeeping: DeadlineTrigger::new(now, config.housekeeping_interval),
            negotiator: ResolutionNegotiator::new(config.initial_resolution),
            registry: ClientRegistry::new(),
            pipeline: FramePipeline::new(MemoryGate::new(config.min_free_memory)),
            events_tx,
            events_rx,
            started_at: Instant::now(),
            config,
            camera,
            transport,
            runtime,
            led,
        }
    }

    /// Handle for delivering transport events into the core.
    pub fn event_sender(&self) -> EventSender {
        EventSender {
            tx: self.events_tx.clone(),
        }
    }

    /// The client registry.
    pub fn registry(&self) -> &ClientRegistry {
        &self.registry
    }

    /// The transport collaborator.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The camera collaborator.
    pub fn camera(&self) -> &C {
        &self.camera
    }

    /// The active capture resolution.
    pub fn resolution(&self) -> Resolution {
        self.negotiator.current()
    }

    /// Snapshot for the external status surface.
    pub fn status(&self) -> DeviceStatus {
        DeviceStatus {
            uptime: self.started_at.elapsed(),
            connected_clients: self.registry.connected_count(),
            last_active_client: self.registry.last_active(),
            resolution: self.negotiator.current(),
            free_memory: self.runtime.free_memory(),
            metrics: self.pipeline.metrics().clone(),
        }
    }

    /// Change the capture resolution on behalf of an external caller (the
    /// HTTP control surface).
    ///
    /// An accepted change applies at the start of the next frame cycle.
    pub fn request_resolution(&mut self, width: u32, height: u32) -> Result<Resolution> {
        let resolved = self.negotiator.request_change(width, height)?;
        tracing::info!(resolution = %resolved, "resolution changed");
        Ok(resolved)
    }

    /// Serve a one-shot still capture at the configured still resolution.
    pub fn capture_still(&mut self) -> Result<Frame> {
        let frame = self
            .pipeline
            .capture_still(&mut self.camera, self.config.still_resolution)?;
        Ok(frame)
    }

    /// Reconfigure the status-LED blink pattern without resetting phase
    /// alignment.
    pub fn set_blink_pattern(&mut self, high: std::time::Duration, low: std::time::Duration) {
        self.blink.set_pattern(
            high.max(std::time::Duration::from_millis(1)),
            low.max(std::time::Duration::from_millis(1)),
        );
    }

    /// Apply one transport event immediately.
    ///
    /// This is the single-threaded embedding entry point; async transports
    /// should go through [`event_sender`](Self::event_sender) instead, which
    /// queues into the same code path.
    pub fn handle_event(&mut self, event: ClientEvent) {
        self.registry.apply(&event);

        if let ClientEvent::Text { id, message } = &event {
            match control::parse(message) {
                Some(ControlCommand::SetResolution { width, height }) => {
                    match self.negotiator.request_change(width, height) {
                        Ok(resolved) => {
                            tracing::info!(
                                client = %id,
                                resolution = %resolved,
                                "resolution changed by stream client"
                            );
                        }
                        Err(error) => {
                            tracing::warn!(
                                client = %id,
                                error = %error,
                                "resolution change rejected"
                            );
                        }
                    }
                }
                None => {
                    tracing::debug!(client = %id, message = %message, "unhandled text message");
                }
            }
        }
    }

    /// Run one scheduler pass at `now`.
    ///
    /// Drains pending events, then evaluates every activity's trigger in
    /// fixed order — blink, heartbeat, frame cycle, housekeeping — running
    /// due activities to completion. Never blocks.
    pub fn pass(&mut self, now: Ticks) {
        self.drain_events();

        self.blink.tick(now, &mut self.led);

        if self.heartbeat.evaluate(now) {
            tracing::info!(
                uptime = %now,
                clients = self.registry.connected_count(),
                free = self.runtime.free_memory(),
                "still alive"
            );
        }

        // Coalescing evaluation caps the capture rate: after a stall the
        // cycle resumes at frame_interval instead of bursting.
        if self.frame_cycle.evaluate_coalescing(now) {
            let resolution = self.negotiator.current();
            let consumers = self.registry.connected_count();
            self.pipeline.run_cycle(
                &mut self.camera,
                &mut self.transport,
                &self.runtime,
                resolution,
                consumers,
            );
        }

        if self.housekeeping.evaluate(now) {
            let reclaimed = self.transport.reclaim_stale();
            if reclaimed > 0 {
                tracing::debug!(reclaimed = reclaimed, "reclaimed stale connections");
            }
        }
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
        }
    }

    /// Drive the scheduler until the process ends.
    ///
    /// Passes are paced by `pass_interval`; queued transport events are
    /// applied promptly between passes, on this same task.
    pub async fn run(&mut self) -> Result<()> {
        tracing::info!(
            resolution = %self.negotiator.current(),
            frame_interval_ms = self.config.frame_interval.as_millis() as u64,
            min_free = self.config.min_free_memory,
            "camera server running"
        );

        let mut ticker = tokio::time::interval(self.config.pass_interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let now = self.runtime.now();
                    self.pass(now);
                }
                event = self.events_rx.recv() => {
                    // The server holds its own sender, so the channel cannot
                    // close while we are running.
                    if let Some(event) = event {
                        self.handle_event(event);
                    }
                }
            }
        }
    }

    /// Drive the scheduler until `shutdown` completes.
    pub async fn run_until<F>(&mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            _ = shutdown => {
                tracing::info!("shutdown signal received");
                Ok(())
            }
            result = self.run() => result,
        }
    }
}
