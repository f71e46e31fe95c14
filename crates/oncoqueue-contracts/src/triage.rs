//! Triage decision types.
//!
//! The resolver never just returns a number and a date: each half of the
//! result carries where it came from, so callers can tell an advisor-backed
//! decision from a fallback one without scraping logs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Urgency ranking, always within `Priority::MIN..=Priority::MAX`.
///
/// 5 is the most urgent. The only way to build one is through
/// [`Priority::clamped`], so the range invariant holds everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "i64")]
pub struct Priority(u8);

impl Priority {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Clamp any integer into `[MIN, MAX]`.
    pub fn clamped(raw: i64) -> Self {
        Self(raw.clamp(i64::from(Self::MIN), i64::from(Self::MAX)) as u8)
    }

    /// The lowest priority, used when nothing else is known.
    pub fn lowest() -> Self {
        Self(Self::MIN)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> Self {
        p.0
    }
}

impl TryFrom<i64> for Priority {
    type Error = String;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&raw) {
            Ok(Self(raw as u8))
        } else {
            Err(format!("priority {raw} outside {}..={}", Self::MIN, Self::MAX))
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The contribution of each heuristic factor to a fallback score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Points added for the cancer stage (0..=stage cap).
    pub stage_bonus: i64,
    /// Temperature above the fever threshold.
    pub fever: bool,
    /// Heart rate outside the normal band.
    pub abnormal_heart_rate: bool,
    /// First emergency keyword found in the description, if any.
    pub emergency_keyword: Option<String>,
    /// Sum before clamping.
    pub raw_total: i64,
}

/// Where a priority came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PrioritySource {
    /// The advisor's value, clamped into range.
    Advisor { suggested: i64 },
    /// The heuristic scorer, used because the advisor gave nothing usable.
    Fallback { breakdown: ScoreBreakdown },
}

/// A resolved priority plus its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityDecision {
    pub priority: Priority,
    pub source: PrioritySource,
}

/// Which branch of the appointment procedure produced the timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum AppointmentBasis {
    /// The advisor's date, at midnight.
    AdvisorDate,
    /// The advisor's date was too far out for a high-priority patient.
    HighPriorityCap { days: i64 },
    /// The advisor's date was too far out for a medium-priority patient.
    MediumPriorityCap { days: i64 },
    /// No usable advisor date; fixed offset by priority.
    OffsetTable { days: i64 },
    /// High priority arriving after hours; next morning replaces the candidate.
    AfterHours,
}

/// A resolved appointment plus its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentDecision {
    #[serde(with = "crate::timestamp")]
    pub appointment: NaiveDateTime,
    pub basis: AppointmentBasis,
    /// Why the advisor's date was discarded, when one was offered and rejected.
    pub rejected_advisor_date: Option<String>,
}

/// The final (priority, appointment) pair used to order the treatment queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageResult {
    pub priority: Priority,
    #[serde(with = "crate::timestamp")]
    pub appointment: NaiveDateTime,
}
