//! Camera collaborator and capture types
//!
//! The sensor itself is an external collaborator behind the [`Camera`]
//! trait: a single-call, non-reentrant resource with no latency guarantee.
//! The cooperative scheduling model keeps at most one capture in flight.

pub mod frame;
pub mod resolution;

pub use frame::Frame;
pub use resolution::{Resolution, ResolutionError, ResolutionNegotiator};

/// Why a capture produced no frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraError {
    /// The sensor returned no frame.
    CaptureFailed,
    /// The sensor is occupied by another in-flight operation.
    Busy,
}

impl std::fmt::Display for CameraError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CameraError::CaptureFailed => write!(f, "camera capture failed"),
            CameraError::Busy => write!(f, "camera busy"),
        }
    }
}

impl std::error::Error for CameraError {}

/// The camera driver.
///
/// Capture failures are transient by design: the caller skips the cycle and
/// the next trigger firing retries naturally.
pub trait Camera {
    /// Acquire one frame at the given resolution.
    fn capture(&mut self, resolution: Resolution) -> Result<Frame, CameraError>;

    /// Switch the sensor to a new resolution, reporting whether the sensor
    /// accepted it.
    fn change_resolution(&mut self, resolution: Resolution) -> bool;
}
