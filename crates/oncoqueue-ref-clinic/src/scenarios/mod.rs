//! Reference clinic demo scenarios.
//!
//! Each scenario wires the real desk components (clinic policy, scripted
//! advisor, in-memory queue, fixed clock) with mock intake forms and shows a
//! distinct triage path.

pub mod after_hours;
pub mod ai_guided;
pub mod fallback_scoring;
pub mod queue_board;

use oncoqueue_contracts::{
    timestamp,
    triage::{AppointmentBasis, PrioritySource},
};
use oncoqueue_core::Admission;

/// Print one admission the way every scenario reports it.
pub(crate) fn print_admission(admission: &Admission) {
    let intake = &admission.entry.intake;
    println!("  Patient:      {} ({}, {})", intake.name, intake.cancer_stage, intake.therapy_type);

    if let Some(error) = &admission.advisor_error {
        println!("  Advisor:      FAILED ({})", error);
    }

    match &admission.priority.source {
        PrioritySource::Advisor { suggested } => println!(
            "  Priority:     {} (advisor suggested {})",
            admission.priority.priority, suggested
        ),
        PrioritySource::Fallback { breakdown } => {
            println!(
                "  Priority:     {} (fallback score {})",
                admission.priority.priority, breakdown.raw_total
            );
            println!(
                "                stage +{}, fever {}, heart rate {}, keyword {}",
                breakdown.stage_bonus,
                yes_no(breakdown.fever),
                yes_no(breakdown.abnormal_heart_rate),
                breakdown.emergency_keyword.as_deref().unwrap_or("none"),
            );
        }
    }

    if let Some(reason) = &admission.appointment.rejected_advisor_date {
        println!("  Advisor date: REJECTED ({})", reason);
    }
    println!(
        "  Appointment:  {} [{}]",
        timestamp::format(&admission.appointment.appointment),
        describe_basis(&admission.appointment.basis)
    );
    println!();
}

fn describe_basis(basis: &AppointmentBasis) -> String {
    match basis {
        AppointmentBasis::AdvisorDate => "advisor date".to_string(),
        AppointmentBasis::HighPriorityCap { days } => {
            format!("advisor date too far out, now + {} day(s)", days)
        }
        AppointmentBasis::MediumPriorityCap { days } => {
            format!("advisor date too far out, now + {} day(s)", days)
        }
        AppointmentBasis::OffsetTable { days } => format!("offset table, now + {} day(s)", days),
        AppointmentBasis::AfterHours => "after hours, next morning".to_string(),
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
