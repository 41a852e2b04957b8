//! Captured frame type
//!
//! A frame is owned by the capture pipeline for the duration of one cycle:
//! handed by reference to the broadcast step and dropped at the end of the
//! cycle, never retained. The pixel payload is `Bytes`, so handing the same
//! frame to many consumers reference-counts one allocation.

use bytes::Bytes;

use super::resolution::Resolution;

/// One captured image.
#[derive(Debug, Clone)]
pub struct Frame {
    resolution: Resolution,
    data: Bytes,
}

impl Frame {
    /// Wrap an encoded image produced at `resolution`.
    pub fn new(resolution: Resolution, data: Bytes) -> Self {
        Self { resolution, data }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.resolution.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.resolution.height
    }

    /// The resolution this frame was captured at.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Encoded payload length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The encoded payload.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Consume the frame, keeping only the payload.
    pub fn into_data(self) -> Bytes {
        self.data
    }
}
