//! Network transport collaborator
//!
//! The core never touches sockets. The transport delivers client lifecycle
//! events into the registry (see [`crate::registry::ClientEvent`]) and takes
//! frame payloads back out through this trait. Per-connection failure
//! isolation is the transport's contract: one consumer failing to receive a
//! frame must not abort delivery to the others.

use bytes::Bytes;

use crate::registry::ClientId;

/// Per-consumer outcome of one broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    /// The consumer the frame was offered to.
    pub client: ClientId,
    /// Whether the transport accepted the frame for this consumer.
    pub ok: bool,
}

/// Outbound side of the network transport.
pub trait Transport {
    /// Deliver `payload` to every connected consumer, reporting a
    /// per-consumer success flag.
    ///
    /// `Bytes` is reference counted, so fanning the same payload out to many
    /// consumers shares one allocation.
    fn send_to_all(&mut self, payload: &Bytes) -> Vec<Delivery>;

    /// Reclaim stale connections, returning how many were torn down.
    ///
    /// Invoked periodically by housekeeping; fire-and-forget, never
    /// escalated.
    fn reclaim_stale(&mut self) -> usize;
}
