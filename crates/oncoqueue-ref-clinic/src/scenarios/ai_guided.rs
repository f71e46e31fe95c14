//! Scenario 1: Advisor-guided triage
//!
//! The advisor answers every intake. Its answers arrive in three shapes (a
//! bare JSON object, JSON inside a fenced block, plain prose), and each one
//! exercises a different appointment branch:
//!
//!   1. Stage 1 review, priority 2, date a week out       → advisor date kept
//!   2. Stage 4 fever, priority 5, date seven weeks out   → capped to now + 1 day
//!   3. Stage 3 fatigue, priority 3, date 18 days out     → capped to now + 5 days
//!   4. Stage 4 bleeding, priority 9, date in the past    → priority clamped to 5,
//!                                                          date rejected, offset table

use oncoqueue_advisor::ScriptedReply;
use oncoqueue_contracts::error::OncoResult;
use oncoqueue_core::Admission;
use oncoqueue_queue::InMemoryQueue;

use crate::{
    clinic_desk_at,
    mock_data::{
        clean_json, clinic_day, neutropenic_fever, plain_text, post_surgical_bleeding,
        progressive_fatigue, prose_wrapped, routine_review,
    },
    scenarios::print_admission,
};

/// Admit the four scenario patients at 10:00 on the clinic day.
pub fn admit_patients(queue: &InMemoryQueue) -> OncoResult<Vec<Admission>> {
    let desk = clinic_desk_at(
        vec![
            ScriptedReply::Envelope(clean_json(2, "2024-03-18")),
            ScriptedReply::Envelope(prose_wrapped(5, "2024-04-30")),
            ScriptedReply::Envelope(plain_text(3, "2024-03-29")),
            ScriptedReply::Envelope(clean_json(9, "2024-03-01")),
        ],
        queue,
        clinic_day(10, 0),
    )?;

    [
        routine_review(),
        neutropenic_fever(),
        progressive_fatigue(),
        post_surgical_bleeding(),
    ]
    .iter()
    .map(|body| desk.admit(body))
    .collect()
}

/// Run Scenario 1: Advisor-guided triage.
pub fn run_scenario() -> OncoResult<()> {
    println!("=== Scenario 1: Advisor-Guided Triage ===");
    println!();
    println!("  Clock: 2024-03-11 10:00:00 (within clinic hours)");
    println!();

    let queue = InMemoryQueue::new();
    for admission in admit_patients(&queue)? {
        print_admission(&admission);
    }

    println!("  Patients queued: {}", queue.len());
    println!();
    println!("  Scenario 1 complete.");
    println!();

    Ok(())
}
