//! # camcast
//!
//! Cooperative scheduler and frame-streaming core for camera devices.
//!
//! A single control-flow context multiplexes four independent periodic
//! activities — status-LED blink, liveness heartbeat, camera frame
//! capture/broadcast, and connection housekeeping — without blocking any
//! one activity on another, and without exhausting memory under bursty
//! network conditions: the memory-expensive broadcast is gated behind a
//! live free-memory admission check sampled immediately before every
//! capture.
//!
//! # Architecture
//!
//! ```text
//!                        CameraServer (one pass)
//!          ┌──────────────┬───────────────┬────────────────┐
//!          ▼              ▼               ▼                ▼
//!     BlinkPattern   heartbeat      FramePipeline     housekeeping
//!     (catch-up      (DeadlineTrigger)   │            (DeadlineTrigger)
//!      toggles)                          │                 │
//!          │                             ▼                 ▼
//!      StatusLed              MemoryGate::admit      Transport::
//!                                        │            reclaim_stale
//!                             ClientRegistry count
//!                                        │
//!                             Camera::capture(res)
//!                                        │
//!                             Transport::send_to_all
//! ```
//!
//! Timekeeping uses a wrapping `u32` millisecond domain ([`Ticks`]); all
//! deadline arithmetic is wraparound-safe, so schedules survive the counter
//! overflow at ~49.7 days of uptime.
//!
//! The camera, transport, runtime, and LED are narrow collaborator traits.
//! The transport hands client lifecycle and message events into the core
//! through an [`EventSender`]; resolution changes arrive either from an
//! HTTP-style caller ([`CameraServer::request_resolution`]) or in-band as
//! text commands on a stream connection. Both are applied inside the core's
//! single-threaded context, which is the system's substitute for locking.

pub mod camera;
pub mod error;
pub mod registry;
pub mod runtime;
pub mod sched;
pub mod server;
pub mod stats;
pub mod stream;
pub mod transport;

#[cfg(test)]
pub(crate) mod testutil;

pub use camera::{Camera, CameraError, Frame, Resolution, ResolutionError, ResolutionNegotiator};
pub use error::{Error, Result};
pub use registry::{ClientEvent, ClientId, ClientRegistry};
pub use runtime::{Runtime, StatusLed};
pub use sched::{BlinkPattern, DeadlineTrigger, Ticks};
pub use server::{CameraServer, ControlCommand, DeviceStatus, EventSender, ServerConfig};
pub use stats::StreamMetrics;
pub use stream::{CycleOutcome, FramePipeline, MemoryGate};
pub use transport::{Delivery, Transport};
