//! Queue admissions and the receipts handed back to the intake caller.
//!
//! `QueueEntry` is what the queue stores, one per admitted patient.
//! `AdmissionReceipt` and `ErrorBody` are the JSON bodies the intake endpoint
//! answers with.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
    intake::PatientIntake,
    triage::{PrioritySource, TriageResult},
};

/// Unique identifier for an admitted patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatientId(pub uuid::Uuid);

impl PatientId {
    /// Create a new, unique patient ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for PatientId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PatientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One admitted patient waiting in the treatment queue.
///
/// Entries are immutable once written; re-triage means a new admission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueEntry {
    pub id: PatientId,
    pub intake: PatientIntake,
    pub result: TriageResult,
    /// Whether the priority came from the advisor or the fallback scorer.
    pub priority_source: PrioritySource,
    /// Admission time; breaks ties between equal priorities (earlier first).
    #[serde(with = "crate::timestamp")]
    pub created_at: NaiveDateTime,
}

/// Successful intake response: `{"success": true, "priority": 4, "appointment": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionReceipt {
    pub success: bool,
    pub priority: u8,
    pub appointment: String,
}

impl AdmissionReceipt {
    pub fn for_result(result: &TriageResult) -> Self {
        Self {
            success: true,
            priority: result.priority.value(),
            appointment: crate::timestamp::format(&result.appointment),
        }
    }
}

/// Failed intake response: `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            error: error.to_string(),
        }
    }
}
