//! Trait seams for the triage pipeline.
//!
//! - `Advisor`: untrusted (backed by an external model, may fail)
//! - `TriagePolicy`: trusted, pure decision logic
//! - `QueueWriter`: sink for admitted patients
//! - `Clock`: source of "now"
//!
//! The desk wires them together. Nothing the advisor returns reaches the
//! queue without passing through the policy first.

use chrono::NaiveDateTime;

use oncoqueue_contracts::{
    admission::QueueEntry,
    error::OncoResult,
    intake::PatientIntake,
    suggestion::AiSuggestion,
    triage::{AppointmentDecision, Priority, PriorityDecision},
};

/// An external model that suggests a priority and an appointment date.
///
/// Implementations are **untrusted**. Any error is treated by the desk as
/// "no suggestion" and the fallback path takes over.
pub trait Advisor: Send + Sync {
    /// Ask for a suggestion for this patient.
    fn suggest(&self, intake: &PatientIntake) -> OncoResult<AiSuggestion>;
}

/// The triage resolver: turns intake data and an optional suggestion into a
/// validated decision.
///
/// Implementations must be total. They never fail for any input shape; bad
/// suggestions are absorbed and recorded in the returned decision.
pub trait TriagePolicy: Send + Sync {
    /// Resolve the priority. `suggested` is the advisor's priority, if it
    /// supplied one that could be read as an integer.
    fn prioritize(&self, intake: &PatientIntake, suggested: Option<i64>) -> PriorityDecision;

    /// Resolve the appointment for an already-resolved priority.
    fn schedule(
        &self,
        priority: Priority,
        now: NaiveDateTime,
        suggested_date: Option<&str>,
    ) -> AppointmentDecision;
}

/// Append-only sink for queue admissions.
pub trait QueueWriter: Send + Sync {
    /// Record one admitted patient.
    fn admit(&self, entry: &QueueEntry) -> OncoResult<()>;
}

/// Source of the current local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}
