//! Client registry for stream consumers
//!
//! Tracks which consumers are connected and which one spoke most recently.
//! The transport never reaches into registry internals: every connect,
//! disconnect, and inbound message becomes a [`ClientEvent`] applied through
//! [`ClientRegistry::apply`], keeping all mutation inside the core's single
//! control-flow context.
//!
//! ```text
//!   transport events                 frame pipeline
//!   (connect / disconnect /          (consumer count gate)
//!    text / binary / pong)                  ▲
//!            │                              │
//!            ▼                              │
//!      ClientEvent ──► ClientRegistry ──────┘
//!                        │ clients: map<ClientId, ClientEntry>
//!                        │ last_active: Option<ClientId>
//!                        ▼
//!               in-band control routing
//!               ("most recent" consumer)
//! ```

pub mod event;
pub mod store;

pub use event::{ClientEvent, ClientId};
pub use store::{ClientEntry, ClientRegistry};
