//! Crate-level error type

use crate::camera::{CameraError, ResolutionError};

/// Convenience alias used across the crate's public surface.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for core operations.
///
/// Nothing in here is fatal to the device: capture errors skip a cycle,
/// resolution errors reject a request. The scheduler's periodicity is the
/// recovery mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The camera collaborator failed.
    Camera(CameraError),
    /// A resolution change request was rejected.
    Resolution(ResolutionError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Camera(e) => write!(f, "camera: {}", e),
            Error::Resolution(e) => write!(f, "resolution: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Camera(e) => Some(e),
            Error::Resolution(e) => Some(e),
        }
    }
}

impl From<CameraError> for Error {
    fn from(e: CameraError) -> Self {
        Error::Camera(e)
    }
}

impl From<ResolutionError> for Error {
    fn from(e: ResolutionError) -> Self {
        Error::Resolution(e)
    }
}
