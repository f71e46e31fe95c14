//! Free-text diagnosis helper.
//!
//! A basic health form becomes a chat prompt; the chat response becomes
//! prose for display. The text is shown to a person as-is and never feeds
//! triage.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use oncoqueue_contracts::error::{OncoError, OncoResult};

use crate::{
    envelope::chat_text,
    request::{chat_request, AdvisorRequest},
    settings::VendorSettings,
};

/// The basic health form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthForm {
    pub blood_pressure: String,
    pub weight_kg: f64,
    pub symptoms: String,
}

impl HealthForm {
    /// Build a form from raw field values; weight must be a positive number.
    pub fn new(blood_pressure: &str, weight_kg: &str, symptoms: &str) -> OncoResult<Self> {
        let weight = weight_kg
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|w| w.is_finite() && *w > 0.0)
            .ok_or_else(|| OncoError::InvalidField {
                field: "weight".to_string(),
                reason: format!("expected a positive number, got '{weight_kg}'"),
            })?;
        Ok(Self {
            blood_pressure: blood_pressure.to_string(),
            weight_kg: weight,
            symptoms: symptoms.to_string(),
        })
    }
}

pub fn diagnosis_prompt(form: &HealthForm) -> String {
    format!(
        "Assess this patient:\n\
         - Blood pressure: {}\n\
         - Weight: {} kg\n\
         - Symptoms: {}\n\
         \n\
         1. Which illnesses could explain these findings?\n\
         2. Which values are within normal range, and which are not?\n\
         3. Should they see a doctor, and why?",
        form.blood_pressure, form.weight_kg, form.symptoms
    )
}

/// The chat call for a form.
pub fn diagnosis_request(settings: &VendorSettings, form: &HealthForm) -> AdvisorRequest {
    chat_request(settings, &diagnosis_prompt(form))
}

/// Prose to display for a chat outcome. Failures become a readable message
/// instead of an error.
pub fn render_diagnosis(outcome: OncoResult<Value>) -> String {
    match outcome {
        Ok(response) => chat_text(&response),
        Err(OncoError::AdvisorUnavailable { reason }) => {
            format!("An error occurred while connecting to the AI service: {reason}")
        }
        Err(e) => format!("An unexpected error occurred: {e}"),
    }
}
