//! Client registry implementation
//!
//! Per-consumer bookkeeping plus the "most recently active" pointer used to
//! route in-band control replies. Mutated only from the core's control-flow
//! context, so no locking is involved.

use std::collections::HashMap;
use std::time::Instant;

use super::event::{ClientEvent, ClientId};

/// Bookkeeping for one connected consumer.
#[derive(Debug, Clone)]
pub struct ClientEntry {
    /// When the consumer connected.
    pub connected_at: Instant,
    /// Complete frames received from this consumer.
    pub messages: u64,
}

impl ClientEntry {
    fn new() -> Self {
        Self {
            connected_at: Instant::now(),
            messages: 0,
        }
    }
}

/// Registry of connected stream consumers.
///
/// `last_active` always refers to a presently connected consumer: it is set
/// on connect and on every inbound data frame, and cleared exactly when that
/// consumer disconnects.
#[derive(Debug, Default)]
pub struct ClientRegistry {
    clients: HashMap<ClientId, ClientEntry>,
    last_active: Option<ClientId>,
}

impl ClientRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of connected consumers.
    pub fn connected_count(&self) -> u32 {
        self.clients.len() as u32
    }

    /// The most recently active consumer, if any.
    pub fn last_active(&self) -> Option<ClientId> {
        self.last_active
    }

    /// Whether `id` is presently connected.
    pub fn is_connected(&self, id: ClientId) -> bool {
        self.clients.contains_key(&id)
    }

    /// Bookkeeping for a connected consumer.
    pub fn entry(&self, id: ClientId) -> Option<&ClientEntry> {
        self.clients.get(&id)
    }

    /// Apply one transport event.
    pub fn apply(&mut self, event: &ClientEvent) {
        match event {
            ClientEvent::Connected(id) => {
                self.clients.insert(*id, ClientEntry::new());
                self.last_active = Some(*id);
                tracing::info!(
                    client = %id,
                    connected = self.connected_count(),
                    "client connected"
                );
            }
            ClientEvent::Disconnected(id) => {
                if self.clients.remove(id).is_none() {
                    tracing::debug!(client = %id, "disconnect for unknown client");
                    return;
                }
                if self.last_active == Some(*id) {
                    self.last_active = None;
                }
                tracing::info!(
                    client = %id,
                    connected = self.connected_count(),
                    "client disconnected"
                );
            }
            ClientEvent::Text { id, message } => {
                self.mark_active(*id);
                tracing::debug!(client = %id, message = %message, "text frame");
            }
            ClientEvent::Binary { id, len } => {
                self.mark_active(*id);
                tracing::debug!(client = %id, len = *len, "binary frame");
            }
            ClientEvent::Pong(id) => {
                tracing::debug!(client = %id, "pong");
            }
            ClientEvent::Fragmented(id) => {
                // Reassembly is unsupported; the payload is dropped and the
                // connection stays open.
                self.mark_active(*id);
                tracing::warn!(client = %id, "frame fragmentation not supported");
            }
        }
    }

    fn mark_active(&mut self, id: ClientId) {
        match self.clients.get_mut(&id) {
            Some(entry) => {
                entry.messages += 1;
                self.last_active = Some(id);
            }
            None => {
                tracing::debug!(client = %id, "data frame from unknown client");
            }
        }
    }
}
