//! In-memory implementation of `QueueWriter`.
//!
//! `InMemoryQueue` keeps every admission in a `Vec` behind an
//! `Arc<Mutex<_>>`. Cloning the queue clones the handle, not the entries, so
//! the desk can own one handle while the caller keeps another to read the
//! board.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use oncoqueue_contracts::{
    admission::{PatientId, QueueEntry},
    error::{OncoError, OncoResult},
};
use oncoqueue_core::traits::QueueWriter;

use crate::board::{board_order, BoardRow, QueueBoard};

// ── Internal mutable state ────────────────────────────────────────────────────

pub(crate) struct QueueState {
    /// Entries in admission order.
    pub(crate) entries: Vec<QueueEntry>,
}

// ── Public queue ──────────────────────────────────────────────────────────────

/// A shared, in-memory treatment queue.
///
/// Nothing is persisted; dropping the last handle drops the queue.
#[derive(Clone)]
pub struct InMemoryQueue {
    pub(crate) state: Arc<Mutex<QueueState>>,
}

impl InMemoryQueue {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(QueueState { entries: Vec::new() })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Number of patients waiting.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries in board order (most urgent first).
    pub fn ordered(&self) -> Vec<QueueEntry> {
        let mut entries = self.lock().entries.clone();
        // Stable sort keeps admission order for identical timestamps.
        entries.sort_by(board_order);
        entries
    }

    /// The queue board in board order.
    pub fn board(&self) -> QueueBoard {
        QueueBoard {
            queue: self.ordered().iter().map(BoardRow::from).collect(),
        }
    }

    /// The queue board rendered as JSON.
    pub fn board_json(&self) -> serde_json::Value {
        serde_json::to_value(self.board()).unwrap_or_else(|_| serde_json::json!({ "queue": [] }))
    }

    /// Look up one entry by id.
    pub fn get(&self, id: PatientId) -> Option<QueueEntry> {
        self.lock().entries.iter().find(|e| e.id == id).cloned()
    }
}

impl Default for InMemoryQueue {
    fn default() -> Self {
        Self::new()
    }
}

// ── QueueWriter impl ──────────────────────────────────────────────────────────

impl QueueWriter for InMemoryQueue {
    /// Append an entry. Admitting the same id twice is rejected.
    fn admit(&self, entry: &QueueEntry) -> OncoResult<()> {
        let mut state = self.state.lock().map_err(|e| OncoError::QueueWriteFailed {
            reason: format!("queue state lock poisoned: {}", e),
        })?;

        if state.entries.iter().any(|e| e.id == entry.id) {
            return Err(OncoError::QueueWriteFailed {
                reason: format!("patient {} is already queued", entry.id),
            });
        }

        state.entries.push(entry.clone());
        debug!(
            patient_id = %entry.id,
            priority = %entry.result.priority,
            waiting = state.entries.len(),
            "queue entry appended"
        );
        Ok(())
    }
}
