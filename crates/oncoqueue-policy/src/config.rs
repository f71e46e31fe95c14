//! Triage policy configuration schema.
//!
//! A `PolicyConfig` is deserialized from TOML. Every field has a default, and
//! the defaults are the clinic's standing rules, so an empty document yields
//! the standard policy.
//!
//! Example:
//! ```toml
//! [priority]
//! fever_threshold_c = 38.5
//! emergency_keywords = ["severe", "bleeding"]
//!
//! [appointment]
//! after_hours_start_hour = 17
//!
//! [[appointment.offsets]]
//! priority = 1
//! days = 14
//! ```

use serde::{Deserialize, Serialize};

use oncoqueue_contracts::{
    error::{OncoError, OncoResult},
    triage::Priority,
};

/// Longest offset, in days, any appointment rule may schedule ahead.
pub const MAX_OFFSET_DAYS: i64 = 3650;

/// Top-level policy document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub priority: PriorityRules,
    pub appointment: AppointmentRules,
}

/// Inputs to the fallback priority scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityRules {
    /// Starting score before any factor is applied.
    pub base: i64,
    /// Upper cap on the fallback score (never above `Priority::MAX`).
    pub maximum: i64,
    /// Largest bonus the cancer stage can add.
    pub stage_bonus_cap: i64,
    /// Temperatures strictly above this count as fever.
    pub fever_threshold_c: f64,
    /// Heart rates strictly below this are abnormal.
    pub heart_rate_low: i64,
    /// Heart rates strictly above this are abnormal.
    pub heart_rate_high: i64,
    /// Case-insensitive substrings that flag an emergency description.
    pub emergency_keywords: Vec<String>,
}

impl Default for PriorityRules {
    fn default() -> Self {
        Self {
            base: 1,
            maximum: 5,
            stage_bonus_cap: 3,
            fever_threshold_c: 38.5,
            heart_rate_low: 60,
            heart_rate_high: 100,
            emergency_keywords: [
                "severe",
                "pain",
                "emergency",
                "urgent",
                "bleeding",
                "unconscious",
                "vomiting",
                "difficulty breathing",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

/// Days from now for one priority when no advisor date is usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetRule {
    pub priority: i64,
    pub days: i64,
}

/// Appointment resolution parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppointmentRules {
    pub offsets: Vec<OffsetRule>,
    /// Offset for a priority with no matching rule.
    pub default_offset_days: i64,

    /// Priorities at or above this get the high-priority cap.
    pub high_priority_min: i64,
    /// Advisor dates further out than this are replaced for high priority.
    pub high_priority_max_gap_days: i64,
    /// Replacement offset for high priority.
    pub high_priority_reschedule_days: i64,

    /// The priority that gets the medium cap.
    pub medium_priority: i64,
    pub medium_max_gap_days: i64,
    pub medium_reschedule_days: i64,

    /// Local hour from which high-priority arrivals go to the next morning.
    pub after_hours_start_hour: u32,
    pub after_hours_min_priority: i64,
    /// Hour of the next-morning slot.
    pub next_morning_hour: u32,
    /// Apply the after-hours rule even when the advisor's date was accepted.
    pub after_hours_overrides_ai_date: bool,
}

impl Default for AppointmentRules {
    fn default() -> Self {
        Self {
            offsets: [(1, 14), (2, 10), (3, 5), (4, 1), (5, 0)]
                .into_iter()
                .map(|(priority, days)| OffsetRule { priority, days })
                .collect(),
            default_offset_days: 14,
            high_priority_min: 4,
            high_priority_max_gap_days: 2,
            high_priority_reschedule_days: 1,
            medium_priority: 3,
            medium_max_gap_days: 7,
            medium_reschedule_days: 5,
            after_hours_start_hour: 17,
            after_hours_min_priority: 4,
            next_morning_hour: 9,
            after_hours_overrides_ai_date: true,
        }
    }
}

impl PolicyConfig {
    /// Reject values the resolver cannot honour.
    pub fn validate(&self) -> OncoResult<()> {
        let p = &self.priority;
        let range = i64::from(Priority::MIN)..=i64::from(Priority::MAX);

        if !range.contains(&p.base) {
            return Err(config_error(format!("priority.base {} outside 1..=5", p.base)));
        }
        if !range.contains(&p.maximum) || p.maximum < p.base {
            return Err(config_error(format!(
                "priority.maximum {} must be within base..=5",
                p.maximum
            )));
        }
        if p.stage_bonus_cap < 0 {
            return Err(config_error("priority.stage_bonus_cap must not be negative"));
        }
        if p.heart_rate_low > p.heart_rate_high {
            return Err(config_error("priority.heart_rate_low exceeds heart_rate_high"));
        }
        if p.emergency_keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(config_error("priority.emergency_keywords contains an empty keyword"));
        }

        let a = &self.appointment;
        for (name, hour) in [
            ("after_hours_start_hour", a.after_hours_start_hour),
            ("next_morning_hour", a.next_morning_hour),
        ] {
            if hour > 23 {
                return Err(config_error(format!("appointment.{name} {hour} is not an hour of the day")));
            }
        }
        for rule in &a.offsets {
            if !range.contains(&rule.priority) {
                return Err(config_error(format!(
                    "offset rule for priority {} outside 1..=5",
                    rule.priority
                )));
            }
            if !(0..=MAX_OFFSET_DAYS).contains(&rule.days) {
                return Err(config_error(format!(
                    "offset rule for priority {} has days {} outside 0..={MAX_OFFSET_DAYS}",
                    rule.priority, rule.days
                )));
            }
        }
        for (name, days) in [
            ("default_offset_days", a.default_offset_days),
            ("high_priority_reschedule_days", a.high_priority_reschedule_days),
            ("medium_reschedule_days", a.medium_reschedule_days),
        ] {
            if !(0..=MAX_OFFSET_DAYS).contains(&days) {
                return Err(config_error(format!(
                    "appointment.{name} {days} outside 0..={MAX_OFFSET_DAYS}"
                )));
            }
        }
        Ok(())
    }
}

fn config_error(reason: impl Into<String>) -> OncoError {
    OncoError::ConfigError { reason: reason.into() }
}
