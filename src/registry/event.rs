//! Client lifecycle and message events
//!
//! The event vocabulary the transport uses to talk to the registry. Events
//! are values, not callbacks: the transport constructs them on its own
//! execution context and hands them into the core, which applies them
//! serially.

/// Identity of one connected consumer, assigned by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(u64);

impl ClientId {
    /// Wrap a transport-assigned connection id.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw connection id.
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One event delivered by the transport.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    /// A consumer connected.
    Connected(ClientId),
    /// A consumer disconnected.
    Disconnected(ClientId),
    /// A complete text frame arrived from a consumer.
    Text {
        /// Sender.
        id: ClientId,
        /// Frame payload.
        message: String,
    },
    /// A complete binary frame arrived from a consumer.
    Binary {
        /// Sender.
        id: ClientId,
        /// Payload length in bytes.
        len: usize,
    },
    /// A pong arrived from a consumer.
    Pong(ClientId),
    /// A fragmented frame arrived; reassembly is unsupported and the
    /// payload was dropped.
    Fragmented(ClientId),
}

impl ClientEvent {
    /// The consumer this event concerns.
    pub fn client(&self) -> ClientId {
        match self {
            ClientEvent::Connected(id)
            | ClientEvent::Disconnected(id)
            | ClientEvent::Pong(id)
            | ClientEvent::Fragmented(id) => *id,
            ClientEvent::Text { id, .. } | ClientEvent::Binary { id, .. } => *id,
        }
    }
}
