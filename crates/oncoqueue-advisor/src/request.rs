//! Advisor prompts and request payloads.
//!
//! Nothing here touches the network. An `AdvisorRequest` is the full
//! description of one call (URL, JSON body, timeout); a host HTTP client sends
//! it and feeds the response body back through `envelope`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use oncoqueue_contracts::intake::PatientIntake;

use crate::settings::VendorSettings;

/// One outbound model call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorRequest {
    pub url: String,
    pub body: Value,
    pub timeout_secs: u64,
}

/// Prompt asking the model for a priority and appointment as a bare JSON object.
pub fn triage_prompt(intake: &PatientIntake) -> String {
    format!(
        "You are assisting an oncology triage desk. Review this patient:\n\
         - Age: {age}\n\
         - Cancer stage: {stage}\n\
         - Therapy: {therapy}\n\
         - Vitals: temperature {temp}°C, heart rate {heart} bpm, blood pressure {bp}\n\
         - Symptoms: {symptoms}\n\
         \n\
         Reply with a JSON object only, with these keys:\n\
         - \"priority\": integer 1-5 (5 = most urgent)\n\
         - \"appointment\": recommended appointment date as YYYY-MM-DD\n\
         \n\
         Example: {{\"priority\": 3, \"appointment\": \"2024-03-20\"}}",
        age = intake.age,
        stage = intake.cancer_stage,
        therapy = intake.therapy_type,
        temp = intake.temperature,
        heart = intake.heart_rate,
        bp = intake.blood_pressure,
        symptoms = intake.description,
    )
}

/// A Gemini `generateContent` call for `prompt`.
pub fn gemini_request(settings: &VendorSettings, prompt: &str) -> AdvisorRequest {
    let mut body = json!({
        "contents": [{ "parts": [{ "text": prompt }] }]
    });
    if let Some(t) = settings.temperature {
        body["generationConfig"] = json!({ "temperature": t });
    }
    AdvisorRequest {
        url: format!(
            "{}/{}:generateContent",
            settings.endpoint.trim_end_matches('/'),
            settings.model
        ),
        body,
        timeout_secs: settings.timeout_secs,
    }
}

/// An OpenAI-style chat completion call with a single user message.
pub fn chat_request(settings: &VendorSettings, prompt: &str) -> AdvisorRequest {
    let mut body = json!({
        "model": settings.model,
        "messages": [{ "role": "user", "content": prompt }],
    });
    if let Some(t) = settings.temperature {
        body["temperature"] = json!(t);
    }
    AdvisorRequest {
        url: settings.endpoint.clone(),
        body,
        timeout_secs: settings.timeout_secs,
    }
}
