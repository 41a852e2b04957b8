//! Capture resolution presets and negotiation
//!
//! The sensor only supports a fixed ladder of frame sizes. The negotiator
//! holds the single "current" capture resolution shared by the frame
//! pipeline (read every cycle) and the network control surface (written on
//! request), and rejects requests outside the supported range without
//! mutating state.

/// A capture frame size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
}

/// Sensor preset ladder, ascending by pixel count.
const PRESETS: [Resolution; 14] = [
    Resolution::new(96, 96),
    Resolution::new(160, 120),
    Resolution::new(176, 144),
    Resolution::new(240, 176),
    Resolution::new(240, 240),
    Resolution::new(320, 240),
    Resolution::new(400, 296),
    Resolution::new(480, 320),
    Resolution::new(640, 480),
    Resolution::new(800, 600),
    Resolution::new(1024, 768),
    Resolution::new(1280, 720),
    Resolution::new(1280, 1024),
    Resolution::new(1600, 1200),
];

impl Resolution {
    /// QVGA, 320x240.
    pub const QVGA: Resolution = Resolution::new(320, 240);
    /// VGA, 640x480.
    pub const VGA: Resolution = Resolution::new(640, 480);
    /// SVGA, 800x600.
    pub const SVGA: Resolution = Resolution::new(800, 600);
    /// UXGA, 1600x1200 — the largest supported preset.
    pub const UXGA: Resolution = Resolution::new(1600, 1200);

    const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The smallest supported preset that covers `width` x `height`, or
    /// `None` when no preset does.
    ///
    /// The ladder is ordered by pixel count, so the first covering entry is
    /// the cheapest one.
    pub fn find(width: u32, height: u32) -> Option<Resolution> {
        PRESETS
            .iter()
            .copied()
            .find(|preset| preset.width >= width && preset.height >= height)
    }

    /// All supported presets, ascending by pixel count.
    pub fn presets() -> &'static [Resolution] {
        &PRESETS
    }

    /// Total pixel count.
    pub fn pixels(&self) -> u32 {
        self.width * self.height
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Rejected resolution change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionError {
    /// No supported preset covers the requested dimensions.
    Unsupported {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}

impl std::fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolutionError::Unsupported { width, height } => {
                write!(f, "unsupported resolution: {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for ResolutionError {}

/// Holds the active capture resolution and arbitrates change requests.
///
/// Requests resolve to the nearest covering preset (see
/// [`Resolution::find`]); an accepted change swaps the active value and
/// takes effect at the start of the next capture cycle. A rejected request
/// leaves the active value untouched.
#[derive(Debug, Clone)]
pub struct ResolutionNegotiator {
    current: Resolution,
}

impl ResolutionNegotiator {
    /// Create a negotiator holding `initial` as the active resolution.
    pub fn new(initial: Resolution) -> Self {
        Self { current: initial }
    }

    /// The active capture resolution.
    pub fn current(&self) -> Resolution {
        self.current
    }

    /// Request a change to `width` x `height`.
    ///
    /// On acceptance the resolved preset becomes active and is returned; on
    /// rejection the active resolution is unchanged.
    pub fn request_change(
        &mut self,
        width: u32,
        height: u32,
    ) -> Result<Resolution, ResolutionError> {
        let resolved =
            Resolution::find(width, height).ok_or(ResolutionError::Unsupported { width, height })?;

        self.current = resolved;
        Ok(resolved)
    }
}
