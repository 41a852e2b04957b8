//! Shared fakes for unit tests
//!
//! Simulated collaborators: a camera that synthesizes frames, a transport
//! with a scriptable client list, a runtime with a hand-cranked clock, and a
//! no-op LED.

use std::cell::RefCell;
use std::rc::Rc;

use bytes::Bytes;

use crate::camera::{Camera, CameraError, Frame, Resolution};
use crate::registry::ClientId;
use crate::runtime::{Runtime, StatusLed};
use crate::sched::Ticks;
use crate::transport::{Delivery, Transport};

/// Camera producing synthetic frames of a fixed size.
pub(crate) struct FakeCamera {
    frame_bytes: usize,
    fail: bool,
    captured_at: Vec<Resolution>,
    changes: Vec<Resolution>,
}

impl FakeCamera {
    pub(crate) fn new(frame_bytes: usize) -> Self {
        Self {
            frame_bytes,
            fail: false,
            captured_at: Vec::new(),
            changes: Vec::new(),
        }
    }

    pub(crate) fn failing() -> Self {
        let mut camera = Self::new(0);
        camera.fail = true;
        camera
    }

    pub(crate) fn captures(&self) -> u32 {
        self.captured_at.len() as u32
    }

    pub(crate) fn last_resolution(&self) -> Option<Resolution> {
        self.captured_at.last().copied()
    }

    pub(crate) fn resolution_changes(&self) -> &[Resolution] {
        &self.changes
    }
}

impl Camera for FakeCamera {
    fn capture(&mut self, resolution: Resolution) -> Result<Frame, CameraError> {
        if self.fail {
            return Err(CameraError::CaptureFailed);
        }
        self.captured_at.push(resolution);
        Ok(Frame::new(resolution, Bytes::from(vec![0xA5; self.frame_bytes])))
    }

    fn change_resolution(&mut self, resolution: Resolution) -> bool {
        self.changes.push(resolution);
        true
    }
}

/// Transport with a fixed client list and scriptable per-client failures.
pub(crate) struct FakeTransport {
    clients: Vec<ClientId>,
    failing: Vec<ClientId>,
    /// Payload sizes of every broadcast, in order.
    pub(crate) sent: Vec<usize>,
    /// Number of housekeeping invocations.
    pub(crate) reclaim_calls: u32,
}

impl FakeTransport {
    pub(crate) fn with_clients(ids: &[u64]) -> Self {
        Self {
            clients: ids.iter().copied().map(ClientId::new).collect(),
            failing: Vec::new(),
            sent: Vec::new(),
            reclaim_calls: 0,
        }
    }

    pub(crate) fn fail_client(&mut self, id: u64) {
        self.failing.push(ClientId::new(id));
    }
}

impl Transport for FakeTransport {
    fn send_to_all(&mut self, payload: &Bytes) -> Vec<Delivery> {
        self.sent.push(payload.len());
        self.clients
            .iter()
            .map(|client| Delivery {
                client: *client,
                ok: !self.failing.contains(client),
            })
            .collect()
    }

    fn reclaim_stale(&mut self) -> usize {
        self.reclaim_calls += 1;
        0
    }
}

#[derive(Debug)]
struct FakeRuntimeState {
    now_ms: u32,
    free: u64,
}

/// Runtime with a hand-cranked clock and settable free-memory figure.
///
/// Clones share state, so a test can keep a handle while the server owns
/// another.
#[derive(Debug, Clone)]
pub(crate) struct FakeRuntime {
    state: Rc<RefCell<FakeRuntimeState>>,
}

impl FakeRuntime {
    pub(crate) fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(FakeRuntimeState {
                now_ms: 0,
                free: 1 << 20,
            })),
        }
    }

    pub(crate) fn advance(&self, ms: u32) {
        let mut state = self.state.borrow_mut();
        state.now_ms = state.now_ms.wrapping_add(ms);
    }

    pub(crate) fn set_free_memory(&self, free: u64) {
        self.state.borrow_mut().free = free;
    }
}

impl Runtime for FakeRuntime {
    fn now(&self) -> Ticks {
        Ticks::from_millis(self.state.borrow().now_ms)
    }

    fn free_memory(&self) -> u64 {
        self.state.borrow().free
    }
}

/// LED that discards every level change.
pub(crate) struct NullLed;

impl StatusLed for NullLed {
    fn set(&mut self, _level: bool) {}
}
