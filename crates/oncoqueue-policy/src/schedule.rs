//! Appointment resolution.
//!
//! Evaluated in this order:
//!
//! 1. An advisor date that parses as `YYYY-MM-DD` and is not before today:
//!    a. high priority and more than the high gap away → now + high reschedule
//!    b. medium priority and more than the medium gap away → now + medium reschedule
//!    c. otherwise the advisor date at midnight
//! 2. Otherwise the offset table for the priority, from now.
//! 3. High priority at or after the after-hours start hour → tomorrow at the
//!    next-morning hour, replacing whatever 1 or 2 produced (the advisor date
//!    is only exempt when `after_hours_overrides_ai_date` is off).

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use tracing::{debug, warn};

use oncoqueue_contracts::{
    error::{OncoError, OncoResult},
    triage::{AppointmentBasis, AppointmentDecision},
};

use crate::config::AppointmentRules;

/// Parse an advisor date and check it is not before `today`.
pub fn parse_advisor_date(raw: &str, today: NaiveDate) -> OncoResult<NaiveDate> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
        OncoError::DateParse {
            reason: format!("'{raw}' is not a YYYY-MM-DD date: {e}"),
        }
    })?;
    if date < today {
        return Err(OncoError::DateParse {
            reason: format!("{date} is before today ({today})"),
        });
    }
    Ok(date)
}

/// Days from now for `priority` under the offset table.
pub fn offset_days(rules: &AppointmentRules, priority: i64) -> i64 {
    rules
        .offsets
        .iter()
        .find(|r| r.priority == priority)
        .map(|r| r.days)
        .unwrap_or(rules.default_offset_days)
}

/// `now` plus `days`, or `now` itself when the result is out of range.
fn days_after(now: NaiveDateTime, days: i64) -> NaiveDateTime {
    match TimeDelta::try_days(days).and_then(|d| now.checked_add_signed(d)) {
        Some(later) => later,
        None => {
            warn!(days, now = %now, "appointment offset out of range, using now");
            now
        }
    }
}

/// Resolve the appointment for `priority` at `now`.
pub fn resolve_appointment(
    rules: &AppointmentRules,
    priority: i64,
    now: NaiveDateTime,
    advisor_date: Option<&str>,
) -> AppointmentDecision {
    let today = now.date();
    let mut rejected_advisor_date = None;

    // ── Step 1: advisor date ─────────────────────────────────────────────────
    let from_advisor = match advisor_date.map(|raw| parse_advisor_date(raw, today)) {
        Some(Ok(date)) => {
            let gap = date.signed_duration_since(today).num_days();
            let candidate = if priority >= rules.high_priority_min
                && gap > rules.high_priority_max_gap_days
            {
                let days = rules.high_priority_reschedule_days;
                (days_after(now, days), AppointmentBasis::HighPriorityCap { days })
            } else if priority == rules.medium_priority && gap > rules.medium_max_gap_days {
                let days = rules.medium_reschedule_days;
                (days_after(now, days), AppointmentBasis::MediumPriorityCap { days })
            } else {
                (date.and_time(NaiveTime::default()), AppointmentBasis::AdvisorDate)
            };
            Some(candidate)
        }
        Some(Err(e)) => {
            rejected_advisor_date = Some(e.to_string());
            None
        }
        None => None,
    };

    // ── Step 2: offset table ─────────────────────────────────────────────────
    let advisor_backed = from_advisor.is_some();
    let (appointment, basis) = from_advisor.unwrap_or_else(|| {
        let days = offset_days(rules, priority);
        (days_after(now, days), AppointmentBasis::OffsetTable { days })
    });

    // ── Step 3: after-hours override ─────────────────────────────────────────
    let after_hours = priority >= rules.after_hours_min_priority
        && now.hour() >= rules.after_hours_start_hour
        && (!advisor_backed || rules.after_hours_overrides_ai_date);

    if after_hours {
        let morning = NaiveTime::from_hms_opt(rules.next_morning_hour, 0, 0).unwrap_or_default();
        let appointment = today.succ_opt().unwrap_or(today).and_time(morning);
        debug!(
            priority,
            replaced = ?basis,
            appointment = %appointment,
            "after-hours arrival moved to next morning"
        );
        return AppointmentDecision {
            appointment,
            basis: AppointmentBasis::AfterHours,
            rejected_advisor_date,
        };
    }

    debug!(priority, basis = ?basis, appointment = %appointment, "appointment resolved");
    AppointmentDecision {
        appointment,
        basis,
        rejected_advisor_date,
    }
}
