//! # oncoqueue-ref-clinic
//!
//! Oncology clinic reference runtime for the oncoqueue triage desk.
//!
//! Demonstrates four intake scenarios using mock data:
//!
//! 1. **Advisor-guided triage**: the advisor's priority and date are used,
//!    capped for urgent patients, or discarded when the date is in the past.
//! 2. **Fallback scoring**: the advisor is down or unreadable, and the
//!    heuristic scorer plus the offset table take over.
//! 3. **After-hours arrivals**: urgent patients arriving late are moved to
//!    the next morning.
//! 4. **Queue board**: several admissions and one rejected intake, then the
//!    board as served to the front end.
//!
//! All data is hardcoded and fictional. No external API calls are made: the
//! advisor plays back canned vendor responses.

pub mod mock_data;
pub mod scenarios;

use chrono::NaiveDateTime;
use tracing::debug;

use oncoqueue_advisor::{AdvisorSettings, ScriptedAdvisor, ScriptedReply};
use oncoqueue_contracts::error::OncoResult;
use oncoqueue_core::{clock::FixedClock, traits::Clock, TriageDesk};
use oncoqueue_policy::engine::TomlTriagePolicy;
use oncoqueue_queue::InMemoryQueue;

/// The clinic's policy document: triage rules plus advisor endpoints.
pub const ONCOLOGY_POLICY: &str = include_str!("../policies/oncology.toml");

/// A desk wired to the clinic policy, a scripted advisor and `queue`.
pub fn clinic_desk(
    replies: Vec<ScriptedReply>,
    queue: &InMemoryQueue,
    clock: Box<dyn Clock>,
) -> OncoResult<TriageDesk> {
    let policy = TomlTriagePolicy::from_toml_str(ONCOLOGY_POLICY)?;
    let settings = AdvisorSettings::from_toml_str(ONCOLOGY_POLICY)?;
    debug!(
        model = %settings.triage.model,
        replies = replies.len(),
        "clinic desk wired with scripted advisor"
    );
    let advisor = ScriptedAdvisor::new(settings.triage, replies);
    Ok(TriageDesk::new(
        Box::new(advisor),
        Box::new(policy),
        Box::new(queue.clone()),
        clock,
    ))
}

/// Same as [`clinic_desk`] with the clock frozen at `now`.
pub fn clinic_desk_at(
    replies: Vec<ScriptedReply>,
    queue: &InMemoryQueue,
    now: NaiveDateTime,
) -> OncoResult<TriageDesk> {
    clinic_desk(replies, queue, Box::new(FixedClock(now)))
}

#[cfg(test)]
mod tests {
    use oncoqueue_advisor::AdvisorSettings;
    use oncoqueue_policy::engine::TomlTriagePolicy;

    use super::ONCOLOGY_POLICY;

    #[test]
    fn test_clinic_policy_loads() {
        let policy = TomlTriagePolicy::from_toml_str(ONCOLOGY_POLICY).unwrap();
        let config = policy.config();
        assert_eq!(config.appointment.offsets.len(), 5);
        assert_eq!(config.priority.emergency_keywords.len(), 8);
        assert_eq!(config.appointment.next_morning_hour, 9);
    }

    #[test]
    fn test_clinic_advisor_settings_load() {
        let settings = AdvisorSettings::from_toml_str(ONCOLOGY_POLICY).unwrap();
        assert_eq!(settings, AdvisorSettings::default());
    }
}
