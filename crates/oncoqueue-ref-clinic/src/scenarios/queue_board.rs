//! Scenario 4: Queue board
//!
//! Five intake forms arrive fifteen minutes apart. One is missing its email
//! and is rejected before the advisor is consulted; the other four are
//! admitted. The board then lists them most urgent first, earliest arrival
//! first within a priority, exactly as the front end receives it.

use std::sync::Mutex;

use chrono::{Duration, NaiveDateTime};
use serde_json::Value;

use oncoqueue_advisor::ScriptedReply;
use oncoqueue_contracts::{
    admission::{AdmissionReceipt, ErrorBody},
    error::OncoResult,
};
use oncoqueue_core::traits::Clock;
use oncoqueue_queue::InMemoryQueue;

use crate::{
    clinic_desk,
    mock_data::{
        between_cycles, clean_json, clinic_day, missing_email, neutropenic_fever,
        progressive_fatigue, routine_review,
    },
};

// ── Clock ─────────────────────────────────────────────────────────────────────

/// A clock that moves forward by `step` every time it is read.
pub struct TickingClock {
    next: Mutex<NaiveDateTime>,
    step: Duration,
}

impl TickingClock {
    pub fn new(start: NaiveDateTime, step: Duration) -> Self {
        Self {
            next: Mutex::new(start),
            step,
        }
    }
}

impl Clock for TickingClock {
    fn now(&self) -> NaiveDateTime {
        let mut next = match self.next.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let now = *next;
        *next = now + self.step;
        now
    }
}

// ── Intake run ────────────────────────────────────────────────────────────────

/// The response body for one intake: a receipt or an error body.
#[derive(Debug)]
pub enum IntakeResponse {
    Admitted(AdmissionReceipt),
    Rejected(ErrorBody),
}

/// Submit the five intake forms and return each response in order.
pub fn submit_intakes(queue: &InMemoryQueue) -> OncoResult<Vec<IntakeResponse>> {
    let desk = clinic_desk(
        vec![
            ScriptedReply::Envelope(clean_json(1, "2024-03-25")),
            ScriptedReply::Envelope(clean_json(3, "2024-03-15")),
            ScriptedReply::Envelope(clean_json(5, "2024-03-12")),
            ScriptedReply::Envelope(clean_json(3, "2024-03-16")),
        ],
        queue,
        Box::new(TickingClock::new(clinic_day(9, 0), Duration::minutes(15))),
    )?;

    let bodies = [
        routine_review(),
        progressive_fatigue(),
        missing_email(),
        neutropenic_fever(),
        between_cycles(),
    ];

    Ok(bodies
        .iter()
        .map(|body| match desk.admit(body) {
            Ok(admission) => IntakeResponse::Admitted(admission.receipt()),
            Err(e) => IntakeResponse::Rejected(ErrorBody::new(e)),
        })
        .collect())
}

/// Run Scenario 4: Queue board.
pub fn run_scenario() -> OncoResult<()> {
    println!("=== Scenario 4: Queue Board ===");
    println!();
    println!("  Clock: from 2024-03-11 09:00:00, one intake every 15 minutes");
    println!();

    let queue = InMemoryQueue::new();
    for (i, response) in submit_intakes(&queue)?.iter().enumerate() {
        let body = match response {
            IntakeResponse::Admitted(receipt) => serde_json::to_value(receipt),
            IntakeResponse::Rejected(error) => serde_json::to_value(error),
        }
        .unwrap_or(Value::Null);
        println!("  Intake {}: {}", i + 1, body);
    }
    println!();

    println!("  Queue board ({} waiting):", queue.len());
    for row in queue.board().queue {
        println!(
            "    [{}] {:<16} {:<10} appointment {}  (admitted {})",
            row.priority, row.name, row.cancer_stage, row.appointment, row.created_at
        );
    }
    println!();
    println!("  Scenario 4 complete.");
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use oncoqueue_core::traits::Clock;
    use oncoqueue_queue::InMemoryQueue;

    use super::{submit_intakes, IntakeResponse, TickingClock};
    use crate::mock_data::clinic_day;

    #[test]
    fn test_ticking_clock_advances() {
        let clock = TickingClock::new(clinic_day(9, 0), Duration::minutes(15));
        assert_eq!(clock.now(), clinic_day(9, 0));
        assert_eq!(clock.now(), clinic_day(9, 15));
        assert_eq!(clock.now(), clinic_day(9, 30));
    }

    #[test]
    fn test_missing_email_is_rejected() {
        let queue = InMemoryQueue::new();
        let responses = submit_intakes(&queue).unwrap();
        assert_eq!(responses.len(), 5);

        match &responses[2] {
            IntakeResponse::Rejected(body) => {
                assert!(!body.success);
                assert_eq!(body.error, "missing required field: email");
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
        assert_eq!(queue.len(), 4);
    }

    #[test]
    fn test_receipts_carry_priority_and_appointment() {
        let queue = InMemoryQueue::new();
        let responses = submit_intakes(&queue).unwrap();

        match &responses[3] {
            IntakeResponse::Admitted(receipt) => {
                assert!(receipt.success);
                assert_eq!(receipt.priority, 5);
                assert_eq!(receipt.appointment, "2024-03-12 00:00:00");
            }
            other => panic!("expected Admitted, got {:?}", other),
        }
    }

    #[test]
    fn test_board_order() {
        let queue = InMemoryQueue::new();
        submit_intakes(&queue).unwrap();

        let board = queue.board();
        let order: Vec<(u8, &str, &str)> = board
            .queue
            .iter()
            .map(|r| (r.priority, r.name.as_str(), r.created_at.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                (5, "Tomas Ferreira", "2024-03-11 09:30:00"),
                (3, "Mei Tanaka", "2024-03-11 09:15:00"),
                (3, "Grace Mbeki", "2024-03-11 09:45:00"),
                (1, "Ada Lindqvist", "2024-03-11 09:00:00"),
            ]
        );
    }

    #[test]
    fn test_board_json_shape() {
        let queue = InMemoryQueue::new();
        submit_intakes(&queue).unwrap();

        let json = queue.board_json();
        let rows = json["queue"].as_array().expect("queue should be an array");
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0]["email"], "tomas.ferreira@example.org");
        assert_eq!(rows[0]["priority"], 5);
    }
}
