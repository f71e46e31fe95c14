//! Scenario 3: After-hours arrivals
//!
//! The clock reads 18:30, past the 17:00 after-hours start. Urgent patients
//! (priority 4 and up) go to 09:00 the next morning whatever the advisor
//! proposed; everyone else keeps the normal resolution.
//!
//!   1. Stage 4 fever, advisor priority 4 for tomorrow     → next morning 09:00
//!   2. Stage 2, advisor priority 2 for next week          → advisor date kept
//!   3. Stage 4 bleeding, advisor down, fallback score 5   → next morning 09:00
//!   4. Stage 3, advisor priority 3 in three days          → advisor date kept

use oncoqueue_advisor::ScriptedReply;
use oncoqueue_contracts::error::OncoResult;
use oncoqueue_core::Admission;
use oncoqueue_queue::InMemoryQueue;

use crate::{
    clinic_desk_at,
    mock_data::{
        between_cycles, clean_json, clinic_day, neutropenic_fever, post_surgical_bleeding,
        progressive_fatigue,
    },
    scenarios::print_admission,
};

/// Admit the four scenario patients at 18:30 on the clinic day.
pub fn admit_patients(queue: &InMemoryQueue) -> OncoResult<Vec<Admission>> {
    let desk = clinic_desk_at(
        vec![
            ScriptedReply::Envelope(clean_json(4, "2024-03-12")),
            ScriptedReply::Envelope(clean_json(2, "2024-03-20")),
            ScriptedReply::Failure("connection timed out after 10s".to_string()),
            ScriptedReply::Envelope(clean_json(3, "2024-03-14")),
        ],
        queue,
        clinic_day(18, 30),
    )?;

    [
        neutropenic_fever(),
        between_cycles(),
        post_surgical_bleeding(),
        progressive_fatigue(),
    ]
    .iter()
    .map(|body| desk.admit(body))
    .collect()
}

/// Run Scenario 3: After-hours arrivals.
pub fn run_scenario() -> OncoResult<()> {
    println!("=== Scenario 3: After-Hours Arrivals ===");
    println!();
    println!("  Clock: 2024-03-11 18:30:00 (after hours from 17:00)");
    println!();

    let queue = InMemoryQueue::new();
    for admission in admit_patients(&queue)? {
        print_admission(&admission);
    }

    println!("  Scenario 3 complete.");
    println!();

    Ok(())
}
