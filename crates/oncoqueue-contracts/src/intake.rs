//! Patient intake records and their JSON wire form.
//!
//! The intake form posts camel-ish field names (`cancerStage`, `therapytype`,
//! `temp`, ...). `PatientIntake::from_json` validates all of them up front so
//! nothing downstream has to deal with half-filled records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{OncoError, OncoResult};

/// Wire names of every field the intake form must carry, in validation order.
pub const REQUIRED_FIELDS: [&str; 9] = [
    "name",
    "email",
    "age",
    "cancerStage",
    "therapytype",
    "temp",
    "heart",
    "blood",
    "description",
];

/// A validated patient intake record.
///
/// Only `cancer_stage`, `temperature`, `heart_rate` and `description` feed
/// the fallback scorer; the remaining fields travel with the queue entry and
/// into the advisor prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientIntake {
    pub name: String,
    pub email: String,
    /// Age in whole years, always positive.
    pub age: u32,
    /// Free text expected to contain a stage digit, e.g. "Stage 3".
    pub cancer_stage: String,
    pub therapy_type: String,
    /// Body temperature in degrees Celsius.
    pub temperature: f64,
    /// Heart rate in beats per minute.
    pub heart_rate: i64,
    pub blood_pressure: String,
    /// Symptom description, scanned for emergency keywords.
    pub description: String,
}

impl PatientIntake {
    /// Validate and convert an intake form body.
    ///
    /// Every field in [`REQUIRED_FIELDS`] must be present and non-empty
    /// (null, `""`, `0`, `false`, `[]` and `{}` all count as empty).
    /// Numeric fields accept JSON numbers or numeric strings.
    pub fn from_json(body: &Value) -> OncoResult<Self> {
        for field in REQUIRED_FIELDS {
            match body.get(field) {
                Some(v) if !is_blank(v) => {}
                _ => {
                    return Err(OncoError::MissingField {
                        field: field.to_string(),
                    })
                }
            }
        }

        let age = integer(body, "age")?;
        if age <= 0 || age > i64::from(u32::MAX) {
            return Err(OncoError::InvalidField {
                field: "age".to_string(),
                reason: format!("expected a positive whole number, got {age}"),
            });
        }

        Ok(Self {
            name: text(body, "name")?,
            email: text(body, "email")?,
            age: age as u32,
            cancer_stage: text(body, "cancerStage")?,
            therapy_type: text(body, "therapytype")?,
            temperature: number(body, "temp")?,
            heart_rate: integer(body, "heart")?,
            blood_pressure: text(body, "blood")?,
            description: text(body, "description")?,
        })
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> OncoError {
    OncoError::InvalidField {
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn text(body: &Value, field: &str) -> OncoResult<String> {
    match &body[field] {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(invalid(field, format!("expected text, got {other}"))),
    }
}

fn number(body: &Value, field: &str) -> OncoResult<f64> {
    let value = &body[field];
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(invalid(field, format!("expected a number, got {value}"))),
    }
}

fn integer(body: &Value, field: &str) -> OncoResult<i64> {
    let value = &body[field];
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| invalid(field, format!("expected a whole number, got {value}")))
}
