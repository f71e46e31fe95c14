//! The triage desk: the intake-to-queue pipeline.
//!
//! Every admission runs the same sequence:
//!
//!   Intake → Advisor → Policy (priority) → Policy (appointment) → Queue
//!
//! The advisor is the only untrusted step. Its failure never fails the
//! admission: the desk logs it and hands the policy an empty suggestion, so
//! the fallback scorer and the offset table take over.

use serde_json::Value;
use tracing::{debug, info, warn};

use oncoqueue_contracts::{
    admission::{AdmissionReceipt, PatientId, QueueEntry},
    error::OncoResult,
    intake::PatientIntake,
    suggestion::AiSuggestion,
    triage::{AppointmentDecision, PriorityDecision, TriageResult},
};

use crate::traits::{Advisor, Clock, QueueWriter, TriagePolicy};

/// Everything the desk decided for one patient.
#[derive(Debug, Clone)]
pub struct Admission {
    /// The entry written to the queue.
    pub entry: QueueEntry,
    pub priority: PriorityDecision,
    pub appointment: AppointmentDecision,
    /// The advisor error that forced the fallback path, if any.
    pub advisor_error: Option<String>,
}

impl Admission {
    pub fn result(&self) -> &TriageResult {
        &self.entry.result
    }

    /// The JSON body returned to the intake caller.
    pub fn receipt(&self) -> AdmissionReceipt {
        AdmissionReceipt::for_result(&self.entry.result)
    }
}

/// Orchestrates advisor, policy, clock and queue for each admission.
///
/// The desk holds no per-patient state; one instance serves every intake.
pub struct TriageDesk {
    advisor: Box<dyn Advisor>,
    policy: Box<dyn TriagePolicy>,
    queue: Box<dyn QueueWriter>,
    clock: Box<dyn Clock>,
}

impl TriageDesk {
    pub fn new(
        advisor: Box<dyn Advisor>,
        policy: Box<dyn TriagePolicy>,
        queue: Box<dyn QueueWriter>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self { advisor, policy, queue, clock }
    }

    /// Validate a raw intake body and admit the patient.
    ///
    /// # Errors
    ///
    /// `MissingField` / `InvalidField` when the body fails validation (the
    /// advisor is not consulted), and `QueueWriteFailed` when the queue
    /// rejects the entry. Advisor failures are never returned.
    pub fn admit(&self, body: &Value) -> OncoResult<Admission> {
        let intake = PatientIntake::from_json(body)?;
        self.admit_intake(intake)
    }

    /// Admit an already-validated intake.
    pub fn admit_intake(&self, intake: PatientIntake) -> OncoResult<Admission> {
        let now = self.clock.now();
        let id = PatientId::new();

        debug!(patient_id = %id, stage = %intake.cancer_stage, "triage starting");

        // ── Step 1: Ask the advisor ──────────────────────────────────────────
        let (suggestion, advisor_error) = match self.advisor.suggest(&intake) {
            Ok(suggestion) => {
                debug!(
                    patient_id = %id,
                    priority = ?suggestion.priority,
                    appointment = ?suggestion.appointment_date,
                    "advisor suggestion received"
                );
                (suggestion, None)
            }
            Err(e) => {
                warn!(patient_id = %id, error = %e, "advisor failed, using fallback triage");
                (AiSuggestion::empty(), Some(e.to_string()))
            }
        };

        // ── Step 2: Resolve ──────────────────────────────────────────────────
        let priority = self.policy.prioritize(&intake, suggestion.priority);
        let appointment = self.policy.schedule(
            priority.priority,
            now,
            suggestion.appointment_date.as_deref(),
        );

        if let Some(reason) = &appointment.rejected_advisor_date {
            warn!(patient_id = %id, reason = %reason, "advisor date discarded");
        }

        let entry = QueueEntry {
            id,
            intake,
            result: TriageResult {
                priority: priority.priority,
                appointment: appointment.appointment,
            },
            priority_source: priority.source.clone(),
            created_at: now,
        };

        // ── Step 3: Admit ────────────────────────────────────────────────────
        self.queue.admit(&entry)?;

        info!(
            patient_id = %entry.id,
            priority = %entry.result.priority,
            appointment = %oncoqueue_contracts::timestamp::format(&entry.result.appointment),
            "patient admitted to treatment queue"
        );

        Ok(Admission {
            entry,
            priority,
            appointment,
            advisor_error,
        })
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::{NaiveDate, NaiveDateTime};
    use serde_json::json;

    use oncoqueue_contracts::{
        admission::QueueEntry,
        error::{OncoError, OncoResult},
        intake::PatientIntake,
        suggestion::AiSuggestion,
        triage::{
            AppointmentBasis, AppointmentDecision, Priority, PriorityDecision, PrioritySource,
            ScoreBreakdown,
        },
    };

    use crate::{
        clock::FixedClock,
        traits::{Advisor, QueueWriter, TriagePolicy},
    };

    use super::TriageDesk;

    // ── Mock helpers ─────────────────────────────────────────────────────────

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn body() -> serde_json::Value {
        json!({
            "name": "Rae Okafor",
            "email": "rae@example.org",
            "age": 47,
            "cancerStage": "Stage 2",
            "therapytype": "Radiation",
            "temp": 37.1,
            "heart": 80,
            "blood": "120/80",
            "description": "Routine follow-up"
        })
    }

    /// An advisor that answers with a fixed result and counts calls.
    struct MockAdvisor {
        answer: Result<AiSuggestion, String>,
        calls: Arc<Mutex<u32>>,
    }

    impl MockAdvisor {
        fn answering(suggestion: AiSuggestion) -> Self {
            Self { answer: Ok(suggestion), calls: Arc::new(Mutex::new(0)) }
        }

        fn failing(reason: &str) -> Self {
            Self { answer: Err(reason.to_string()), calls: Arc::new(Mutex::new(0)) }
        }
    }

    impl Advisor for MockAdvisor {
        fn suggest(&self, _intake: &PatientIntake) -> OncoResult<AiSuggestion> {
            *self.calls.lock().unwrap() += 1;
            self.answer
                .clone()
                .map_err(|reason| OncoError::AdvisorUnavailable { reason })
        }
    }

    /// A policy that echoes its inputs so tests can see what the desk passed.
    struct EchoPolicy {
        seen_dates: Arc<Mutex<Vec<Option<String>>>>,
    }

    impl TriagePolicy for EchoPolicy {
        fn prioritize(&self, _intake: &PatientIntake, suggested: Option<i64>) -> PriorityDecision {
            match suggested {
                Some(p) => PriorityDecision {
                    priority: Priority::clamped(p),
                    source: PrioritySource::Advisor { suggested: p },
                },
                None => PriorityDecision {
                    priority: Priority::lowest(),
                    source: PrioritySource::Fallback { breakdown: ScoreBreakdown::default() },
                },
            }
        }

        fn schedule(
            &self,
            _priority: Priority,
            now: NaiveDateTime,
            suggested_date: Option<&str>,
        ) -> AppointmentDecision {
            self.seen_dates
                .lock()
                .unwrap()
                .push(suggested_date.map(str::to_string));
            AppointmentDecision {
                appointment: now,
                basis: AppointmentBasis::OffsetTable { days: 0 },
                rejected_advisor_date: None,
            }
        }
    }

    struct MockQueue {
        entries: Arc<Mutex<Vec<QueueEntry>>>,
        fail: bool,
    }

    impl QueueWriter for MockQueue {
        fn admit(&self, entry: &QueueEntry) -> OncoResult<()> {
            if self.fail {
                return Err(OncoError::QueueWriteFailed { reason: "queue closed".to_string() });
            }
            self.entries.lock().unwrap().push(entry.clone());
            Ok(())
        }
    }

    struct Harness {
        desk: TriageDesk,
        advisor_calls: Arc<Mutex<u32>>,
        seen_dates: Arc<Mutex<Vec<Option<String>>>>,
        entries: Arc<Mutex<Vec<QueueEntry>>>,
    }

    fn harness(advisor: MockAdvisor, queue_fails: bool) -> Harness {
        let advisor_calls = Arc::clone(&advisor.calls);
        let seen_dates = Arc::new(Mutex::new(vec![]));
        let entries = Arc::new(Mutex::new(vec![]));
        let desk = TriageDesk::new(
            Box::new(advisor),
            Box::new(EchoPolicy { seen_dates: Arc::clone(&seen_dates) }),
            Box::new(MockQueue { entries: Arc::clone(&entries), fail: queue_fails }),
            Box::new(FixedClock(now())),
        );
        Harness { desk, advisor_calls, seen_dates, entries }
    }

    // ── Tests ────────────────────────────────────────────────────────────────

    #[test]
    fn test_advisor_suggestion_flows_to_policy() {
        let h = harness(
            MockAdvisor::answering(AiSuggestion {
                priority: Some(4),
                appointment_date: Some("2024-01-11".to_string()),
            }),
            false,
        );

        let admission = h.desk.admit(&body()).unwrap();

        assert_eq!(admission.result().priority.value(), 4);
        assert!(admission.advisor_error.is_none());
        assert_eq!(
            admission.priority.source,
            PrioritySource::Advisor { suggested: 4 }
        );
        assert_eq!(
            *h.seen_dates.lock().unwrap(),
            vec![Some("2024-01-11".to_string())]
        );
    }

    #[test]
    fn test_advisor_failure_falls_back() {
        let h = harness(MockAdvisor::failing("connection refused"), false);

        let admission = h.desk.admit(&body()).unwrap();

        assert!(matches!(admission.priority.source, PrioritySource::Fallback { .. }));
        let err = admission.advisor_error.expect("advisor error must be recorded");
        assert!(err.contains("connection refused"), "got: {err}");
        // No date is offered to the policy when the advisor failed outright.
        assert_eq!(*h.seen_dates.lock().unwrap(), vec![None]);
        assert_eq!(h.entries.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_intake_skips_advisor() {
        let h = harness(MockAdvisor::answering(AiSuggestion::empty()), false);
        let mut bad = body();
        bad.as_object_mut().unwrap().remove("email");

        let result = h.desk.admit(&bad);

        assert!(matches!(result, Err(OncoError::MissingField { .. })));
        assert_eq!(*h.advisor_calls.lock().unwrap(), 0, "advisor must not be called");
        assert!(h.entries.lock().unwrap().is_empty());
    }

    #[test]
    fn test_queue_failure_propagates() {
        let h = harness(MockAdvisor::answering(AiSuggestion::empty()), true);

        let result = h.desk.admit(&body());

        assert!(matches!(result, Err(OncoError::QueueWriteFailed { .. })));
    }

    #[test]
    fn test_entry_uses_clock_for_created_at() {
        let h = harness(MockAdvisor::answering(AiSuggestion::empty()), false);

        let admission = h.desk.admit(&body()).unwrap();

        assert_eq!(admission.entry.created_at, now());
        assert_eq!(admission.entry.intake.name, "Rae Okafor");
        let receipt = admission.receipt();
        assert!(receipt.success);
        assert_eq!(receipt.appointment, "2024-01-10 10:00:00");
    }
}
