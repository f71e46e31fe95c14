//! Scenario 2: Fallback scoring
//!
//! The advisor is never usable here, each time for a different reason:
//!
//!   1. transport failure (HTTP 503)
//!   2. an error body instead of a completion (envelope rejected)
//!   3. a well-formed completion with no priority or date in it
//!   4. no reply at all
//!
//! Every admission still succeeds. The heuristic scorer sets the priority and
//! the offset table sets the appointment.

use oncoqueue_advisor::ScriptedReply;
use oncoqueue_contracts::error::OncoResult;
use oncoqueue_core::Admission;
use oncoqueue_queue::InMemoryQueue;

use crate::{
    clinic_desk_at,
    mock_data::{
        between_cycles, clinic_day, post_surgical_bleeding, quota_error, refusal,
        roman_numeral_stage, routine_review,
    },
    scenarios::print_admission,
};

/// Admit the four scenario patients at 11:30 on the clinic day.
pub fn admit_patients(queue: &InMemoryQueue) -> OncoResult<Vec<Admission>> {
    let desk = clinic_desk_at(
        vec![
            ScriptedReply::Failure("HTTP 503 Service Unavailable".to_string()),
            ScriptedReply::Envelope(quota_error()),
            ScriptedReply::Envelope(refusal()),
        ],
        queue,
        clinic_day(11, 30),
    )?;

    [
        post_surgical_bleeding(),
        between_cycles(),
        roman_numeral_stage(),
        routine_review(),
    ]
    .iter()
    .map(|body| desk.admit(body))
    .collect()
}

/// Run Scenario 2: Fallback scoring.
pub fn run_scenario() -> OncoResult<()> {
    println!("=== Scenario 2: Fallback Scoring ===");
    println!();
    println!("  Clock: 2024-03-11 11:30:00");
    println!("  Score: base 1 + stage bonus + fever + heart rate + emergency keyword, capped at 5");
    println!();

    let queue = InMemoryQueue::new();
    let admissions = admit_patients(&queue)?;
    let fallbacks = admissions.iter().filter(|a| a.advisor_error.is_some()).count();
    for admission in &admissions {
        print_admission(admission);
    }

    println!(
        "  Admissions: {} ({} via fallback, 0 rejected)",
        admissions.len(),
        fallbacks
    );
    println!();
    println!("  Scenario 2 complete.");
    println!();

    Ok(())
}
