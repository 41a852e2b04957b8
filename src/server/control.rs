//! In-band text control messages
//!
//! Connected consumers can steer the stream with plain-text commands on
//! their own connection, mirroring the HTTP control surface. The grammar is
//! one command per frame; anything unrecognized is ignored by the caller
//! (logged, not an error).

/// A parsed control command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    /// Change the capture resolution, e.g. `resolution 640x480`.
    SetResolution {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}

/// Parse one text frame into a command.
///
/// Returns `None` for anything that is not a well-formed command; free-form
/// text on the stream is expected and not an error.
pub fn parse(text: &str) -> Option<ControlCommand> {
    let mut parts = text.split_whitespace();
    let keyword = parts.next()?;

    if !keyword.eq_ignore_ascii_case("resolution") {
        return None;
    }

    let dims = parts.next()?.to_ascii_lowercase();
    if parts.next().is_some() {
        return None;
    }

    let (width, height) = dims.split_once('x')?;
    let width = width.parse().ok()?;
    let height = height.parse().ok()?;

    Some(ControlCommand::SetResolution { width, height })
}
