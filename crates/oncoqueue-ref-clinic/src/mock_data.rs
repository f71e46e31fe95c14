//! Simulated intake forms and advisor responses for the reference clinic.
//!
//! All data in this module is hardcoded and fictional. The intake bodies use
//! the wire field names of the intake form (`cancerStage`, `therapytype`,
//! `temp`, `heart`, `blood`), and the advisor responses mimic the Gemini
//! `generateContent` envelope.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{json, Value};

// ── Clock ─────────────────────────────────────────────────────────────────────

/// Monday 2024-03-11 at `hour:minute`, the reference clinic day.
pub fn clinic_day(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 11)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .unwrap_or_default()
}

// ── Intake forms ──────────────────────────────────────────────────────────────

/// Build an intake body.
#[allow(clippy::too_many_arguments)]
pub fn intake_body(
    name: &str,
    age: u32,
    stage: &str,
    therapy: &str,
    temp: f64,
    heart: i64,
    blood: &str,
    description: &str,
) -> Value {
    let email = format!("{}@example.org", name.to_lowercase().replace(' ', "."));
    json!({
        "name": name,
        "email": email,
        "age": age,
        "cancerStage": stage,
        "therapytype": therapy,
        "temp": temp,
        "heart": heart,
        "blood": blood,
        "description": description
    })
}

/// Early-stage patient in for a routine review.
pub fn routine_review() -> Value {
    intake_body("Ada Lindqvist", 52, "Stage 1", "Hormone therapy", 36.8, 74, "118/76", "Routine review, no new symptoms")
}

/// Late-stage patient with neutropenic fever.
pub fn neutropenic_fever() -> Value {
    intake_body("Tomas Ferreira", 61, "Stage 4", "Chemotherapy", 39.1, 108, "102/64", "Fever and chills since last night")
}

/// Stage 3 patient with worsening fatigue.
pub fn progressive_fatigue() -> Value {
    intake_body("Mei Tanaka", 44, "Stage 3", "Immunotherapy", 37.4, 88, "126/82", "Fatigue getting worse over two weeks")
}

/// Patient whose description carries an emergency keyword.
pub fn post_surgical_bleeding() -> Value {
    intake_body("Omar Suleiman", 70, "Stage 4", "Surgery", 39.2, 112, "95/60", "Severe bleeding at the incision site")
}

/// Stage 2 patient between cycles.
pub fn between_cycles() -> Value {
    intake_body("Grace Mbeki", 38, "Stage 2", "Radiation", 37.0, 72, "120/80", "Mild skin irritation at the field")
}

/// Stage written without a digit; vitals are both out of range.
pub fn roman_numeral_stage() -> Value {
    intake_body("Henrik Dahl", 57, "Stage III", "Chemotherapy", 38.6, 58, "110/70", "Tired and a little dizzy")
}

/// An intake form with the email field left empty.
pub fn missing_email() -> Value {
    let mut body = routine_review();
    body["email"] = json!("");
    body
}

// ── Advisor responses ─────────────────────────────────────────────────────────

/// A Gemini response whose first text part is `text`.
pub fn gemini_envelope(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {
                "parts": [{ "text": text }],
                "role": "model"
            },
            "finishReason": "STOP"
        }],
        "modelVersion": "gemini-2.0-flash"
    })
}

/// The bare JSON object the prompt asks for.
pub fn clean_json(priority: i64, date: &str) -> Value {
    gemini_envelope(&format!("{{\"priority\": {priority}, \"appointment\": \"{date}\"}}"))
}

/// The JSON object wrapped in a fenced block and commentary.
pub fn prose_wrapped(priority: i64, date: &str) -> Value {
    gemini_envelope(&format!(
        "Given the fever and late stage, this patient needs prompt review.\n\
         ```json\n{{\n  \"priority\": {priority},\n  \"appointment\": \"{date}\"\n}}\n```"
    ))
}

/// Plain prose with no JSON object at all.
pub fn plain_text(priority: i64, date: &str) -> Value {
    gemini_envelope(&format!(
        "Priority: {priority}. The earliest reasonable slot is {date}."
    ))
}

/// An error body returned in place of a completion.
pub fn quota_error() -> Value {
    json!({
        "error": {
            "code": 429,
            "message": "Resource has been exhausted (e.g. check quota).",
            "status": "RESOURCE_EXHAUSTED"
        }
    })
}

/// A well-formed envelope whose text carries neither priority nor date.
pub fn refusal() -> Value {
    gemini_envelope("I am not able to assess this patient without a clinician.")
}
