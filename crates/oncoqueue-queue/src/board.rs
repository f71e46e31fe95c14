//! Queue ordering and the queue board wire format.
//!
//! The board lists every waiting patient, most urgent first. Within one
//! priority, earlier admissions come first. Each row is flat so a front end
//! can render it without knowing the intake structure.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use oncoqueue_contracts::{admission::QueueEntry, timestamp};

/// Board order: priority descending, then `created_at` ascending.
pub fn board_order(a: &QueueEntry, b: &QueueEntry) -> Ordering {
    b.result
        .priority
        .cmp(&a.result.priority)
        .then_with(|| a.created_at.cmp(&b.created_at))
}

/// One row of the queue board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: u32,
    pub cancer_stage: String,
    pub therapy_type: String,
    pub temperature: f64,
    pub heart_rate: i64,
    pub blood_pressure: String,
    pub description: String,
    pub priority: u8,
    /// `YYYY-MM-DD HH:MM:SS`
    pub appointment: String,
    /// `YYYY-MM-DD HH:MM:SS`
    pub created_at: String,
}

impl From<&QueueEntry> for BoardRow {
    fn from(entry: &QueueEntry) -> Self {
        let intake = &entry.intake;
        Self {
            id: entry.id.to_string(),
            name: intake.name.clone(),
            email: intake.email.clone(),
            age: intake.age,
            cancer_stage: intake.cancer_stage.clone(),
            therapy_type: intake.therapy_type.clone(),
            temperature: intake.temperature,
            heart_rate: intake.heart_rate,
            blood_pressure: intake.blood_pressure.clone(),
            description: intake.description.clone(),
            priority: entry.result.priority.value(),
            appointment: timestamp::format(&entry.result.appointment),
            created_at: timestamp::format(&entry.created_at),
        }
    }
}

/// The queue board body: `{"queue": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueueBoard {
    pub queue: Vec<BoardRow>,
}
