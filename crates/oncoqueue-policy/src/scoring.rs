//! Priority resolution.
//!
//! An advisor priority that could be read as an integer wins and is clamped
//! into range. Without one, the fallback scorer builds a score from the
//! intake:
//!
//!   base
//!   + stage bonus          (stage digit - 1, capped; 0 when no digit)
//!   + 1 if fever           (temperature > threshold)
//!   + 1 if heart rate out of band
//!   + 1 if any emergency keyword appears in the description (once)
//!
//! and caps it at the configured maximum. None of these steps can fail.

use serde_json::Value;
use tracing::debug;

use oncoqueue_contracts::{
    error::{OncoError, OncoResult},
    intake::PatientIntake,
    suggestion::coerce_priority,
    triage::{Priority, PriorityDecision, PrioritySource, ScoreBreakdown},
};

use crate::config::PriorityRules;

/// Coerce any wire value into a priority in `1..=5`.
///
/// Values that cannot be read as an integer give the lowest priority;
/// everything else is clamped.
pub fn validate_priority(raw: &Value) -> Priority {
    coerce_priority(raw)
        .map(Priority::clamped)
        .unwrap_or_else(|_| Priority::lowest())
}

/// The stage number carried by a cancer-stage description.
///
/// Takes the first decimal digit anywhere in the text, so "3", "Stage 3" and
/// "stage 3B" all give 3.
pub fn stage_number(stage: &str) -> OncoResult<u32> {
    stage
        .chars()
        .find_map(|c| c.to_digit(10))
        .ok_or_else(|| OncoError::MalformedStage {
            stage: stage.to_string(),
        })
}

/// Score an intake without any advisor input.
pub fn fallback_priority(rules: &PriorityRules, intake: &PatientIntake) -> (Priority, ScoreBreakdown) {
    let stage_bonus = match stage_number(&intake.cancer_stage) {
        Ok(digit) => (i64::from(digit) - 1).clamp(0, rules.stage_bonus_cap),
        Err(e) => {
            debug!(error = %e, "no stage adjustment");
            0
        }
    };

    let fever = intake.temperature > rules.fever_threshold_c;
    let abnormal_heart_rate =
        intake.heart_rate > rules.heart_rate_high || intake.heart_rate < rules.heart_rate_low;

    let description = intake.description.to_lowercase();
    let emergency_keyword = rules
        .emergency_keywords
        .iter()
        .find(|k| description.contains(&k.to_lowercase()))
        .cloned();

    let raw_total = rules.base
        + stage_bonus
        + i64::from(fever)
        + i64::from(abnormal_heart_rate)
        + i64::from(emergency_keyword.is_some());

    let priority = Priority::clamped(raw_total.min(rules.maximum));

    (
        priority,
        ScoreBreakdown {
            stage_bonus,
            fever,
            abnormal_heart_rate,
            emergency_keyword,
            raw_total,
        },
    )
}

/// Resolve the final priority from an optional advisor value and the intake.
pub fn resolve_priority(
    rules: &PriorityRules,
    intake: &PatientIntake,
    suggested: Option<i64>,
) -> PriorityDecision {
    match suggested {
        Some(raw) => {
            let priority = Priority::clamped(raw);
            debug!(suggested = raw, priority = %priority, "using advisor priority");
            PriorityDecision {
                priority,
                source: PrioritySource::Advisor { suggested: raw },
            }
        }
        None => {
            let (priority, breakdown) = fallback_priority(rules, intake);
            debug!(
                priority = %priority,
                raw_total = breakdown.raw_total,
                stage_bonus = breakdown.stage_bonus,
                fever = breakdown.fever,
                abnormal_heart_rate = breakdown.abnormal_heart_rate,
                keyword = ?breakdown.emergency_keyword,
                "using fallback priority"
            );
            PriorityDecision {
                priority,
                source: PrioritySource::Fallback { breakdown },
            }
        }
    }
}
