//! Frame capture and admission-controlled broadcast
//!
//! The memory-expensive half of the control loop. One cycle acquires a frame
//! at the current resolution and fans it out to every connected consumer,
//! but only after a live free-memory check admits the allocation the
//! broadcast will need:
//!
//! ```text
//!   frame trigger fires
//!        │
//!        ▼
//!   MemoryGate::admit(free_memory) ──deny──► skip cycle (warn, retry at
//!        │allow                              next firing)
//!        ▼
//!   consumers == 0? ──yes──► skip capture entirely
//!        │no
//!        ▼
//!   Camera::capture(current resolution)     [capture latency bracket]
//!        │
//!        ▼
//!   Transport::send_to_all(frame bytes)     [broadcast latency bracket]
//!        │
//!        ▼
//!   frame released
//! ```

pub mod admission;
pub mod pipeline;

pub use admission::MemoryGate;
pub use pipeline::{CycleOutcome, FramePipeline};
