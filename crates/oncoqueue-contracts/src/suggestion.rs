//! Advisor suggestion types.
//!
//! The advisor is an external model; whatever it returns is untrusted and
//! may be partial. Both fields are optional and the resolver treats a missing
//! field exactly like a failed call.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{OncoError, OncoResult};

/// A priority/date hint extracted from an advisor response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiSuggestion {
    /// Suggested priority, already coerced to an integer but not yet clamped.
    pub priority: Option<i64>,
    /// Suggested appointment date, expected as `YYYY-MM-DD`. Not validated here.
    pub appointment_date: Option<String>,
}

impl AiSuggestion {
    /// A suggestion carrying neither field.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when the advisor produced nothing usable at all.
    pub fn is_empty(&self) -> bool {
        self.priority.is_none() && self.appointment_date.is_none()
    }
}

/// Read a wire value as an integer priority, without clamping.
///
/// Accepts JSON integers, floats (truncated toward zero) and strings holding
/// an integer. Booleans, null, arrays, objects and non-integer strings fail.
pub fn coerce_priority(raw: &Value) -> OncoResult<i64> {
    let coerced = match raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    coerced.ok_or_else(|| OncoError::PriorityCoercion {
        reason: format!("{raw} is not an integer"),
    })
}
