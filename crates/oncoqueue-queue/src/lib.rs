//! # oncoqueue-queue
//!
//! The treatment queue: every admitted patient, ordered most urgent first.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use oncoqueue_queue::InMemoryQueue;
//!
//! let queue = InMemoryQueue::new();
//! let desk = TriageDesk::new(advisor, policy, Box::new(queue.clone()), clock);
//! desk.admit(&body)?;
//! println!("{}", queue.board_json());
//! ```

pub mod board;
pub mod memory;

pub use board::{board_order, BoardRow, QueueBoard};
pub use memory::InMemoryQueue;

// ── Tests ─────────────────────────────────────────────────────────────────────
