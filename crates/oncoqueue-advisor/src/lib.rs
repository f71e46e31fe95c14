//! # oncoqueue-advisor
//!
//! Everything between the triage desk and an external model:
//!
//! 1. **Requests**: prompts and vendor payloads (`request`).
//! 2. **Envelopes**: JSON Schema checks on vendor responses (`envelope`).
//! 3. **Extraction**: a priority and date out of free model text (`extract`).
//!
//! plus offline `Advisor` implementations (`scripted`) and the free-text
//! diagnosis helper (`diagnosis`).
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use oncoqueue_advisor::scripted::{ScriptedAdvisor, ScriptedReply};
//!
//! let advisor = ScriptedAdvisor::new(settings.triage.clone(), [ScriptedReply::Envelope(body)]);
//! // Pass `Box::new(advisor)` to `oncoqueue_core::TriageDesk::new(...)`.
//! ```

pub mod diagnosis;
pub mod envelope;
pub mod extract;
pub mod request;
pub mod scripted;
pub mod settings;

pub use extract::extract_suggestion;
pub use scripted::{parse_gemini_response, ScriptedAdvisor, ScriptedReply, UnavailableAdvisor};
pub use settings::{AdvisorSettings, VendorSettings};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use oncoqueue_contracts::{error::OncoError, intake::PatientIntake};
    use oncoqueue_core::traits::Advisor;

    use super::*;
    use diagnosis::{diagnosis_request, render_diagnosis, HealthForm};
    use envelope::{chat_text, gemini_text, NO_RESPONSE};
    use request::triage_prompt;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn gemini(text: &str) -> Value {
        json!({
            "candidates": [{
                "content": { "parts": [{ "text": text }], "role": "model" }
            }]
        })
    }

    fn intake() -> PatientIntake {
        PatientIntake {
            name: "Noor Haddad".to_string(),
            email: "noor@example.org".to_string(),
            age: 66,
            cancer_stage: "Stage 3".to_string(),
            therapy_type: "Chemotherapy".to_string(),
            temperature: 38.7,
            heart_rate: 96,
            blood_pressure: "135/88".to_string(),
            description: "Fever after cycle 4".to_string(),
        }
    }

    // ── Extraction ────────────────────────────────────────────────────────────

    #[test]
    fn test_extract_fenced_json() {
        let text = "Here is my assessment:\n```json\n{\n  \"priority\": 4,\n  \"appointment\": \"2024-03-20\"\n}\n```";
        let s = extract_suggestion(text);
        assert_eq!(s.priority, Some(4));
        assert_eq!(s.appointment_date.as_deref(), Some("2024-03-20"));
    }

    #[test]
    fn test_extract_json_with_string_priority() {
        let s = extract_suggestion(r#"{"priority": "2", "appointment": "2024-05-01"}"#);
        assert_eq!(s.priority, Some(2));
    }

    #[test]
    fn test_extract_json_unreadable_priority_is_absent() {
        let s = extract_suggestion(r#"{"priority": "high", "appointment": "2024-05-01"}"#);
        assert_eq!(s.priority, None);
        assert_eq!(s.appointment_date.as_deref(), Some("2024-05-01"));
    }

    #[test]
    fn test_extract_out_of_range_priority_kept_unclamped() {
        let s = extract_suggestion(r#"{"priority": 8}"#);
        assert_eq!(s.priority, Some(8), "clamping is the resolver's job");
    }

    #[test]
    fn test_extract_invalid_json_falls_back_to_text() {
        let text = "{priority: 5, appointment: 2024-02-02}";
        let s = extract_suggestion(text);
        assert_eq!(s.priority, Some(5));
        assert_eq!(s.appointment_date.as_deref(), Some("2024-02-02"));
    }

    #[test]
    fn test_extract_plain_text_labelled_priority() {
        let s = extract_suggestion("Priority: 3. Suggested visit on 2024-04-09 in the morning.");
        assert_eq!(s.priority, Some(3));
        assert_eq!(s.appointment_date.as_deref(), Some("2024-04-09"));
    }

    #[test]
    fn test_extract_plain_text_bare_digit() {
        let s = extract_suggestion("I would rate this a 2 out of five.");
        assert_eq!(s.priority, Some(2));
        assert_eq!(s.appointment_date, None);
    }

    #[test]
    fn test_extract_nothing() {
        let s = extract_suggestion("Unable to assess without more information.");
        assert!(s.is_empty());
    }

    // ── Envelopes ─────────────────────────────────────────────────────────────

    #[test]
    fn test_gemini_text_trims() {
        assert_eq!(gemini_text(&gemini("  {\"priority\": 1}\n")).unwrap(), "{\"priority\": 1}");
    }

    #[test]
    fn test_gemini_envelope_shapes_rejected() {
        let bad = [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [{}] }),
            json!({ "candidates": [{ "content": { "parts": [] } }] }),
            json!({ "candidates": [{ "content": { "parts": [{ "inline": "x" }] } }] }),
            json!({ "candidates": [{ "content": { "parts": [{ "text": 12 }] } }] }),
        ];
        for envelope in bad {
            match gemini_text(&envelope) {
                Err(OncoError::MalformedSuggestion { reason }) => assert!(
                    reason.contains("unexpected API response structure"),
                    "reason: {reason}"
                ),
                other => panic!("expected MalformedSuggestion for {envelope}, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_envelope_validator_built_once() {
        let first = envelope::gemini_text(&gemini("{\"priority\": 2}")).unwrap();
        let second = envelope::gemini_text(&gemini("{\"priority\": 3}")).unwrap();
        assert_ne!(first, second);
        assert!(gemini_text(&json!({})).is_err());
        assert!(
            std::ptr::eq(envelope::gemini_validator(), envelope::gemini_validator()),
            "every response reuses the same compiled schema"
        );
    }

    #[test]
    fn test_chat_text_default() {
        let ok = json!({ "choices": [{ "message": { "role": "assistant", "content": "See a doctor." } }] });
        assert_eq!(chat_text(&ok), "See a doctor.");
        assert_eq!(chat_text(&json!({})), NO_RESPONSE);
    }

    #[test]
    fn test_parse_gemini_response_needs_content() {
        assert!(matches!(
            parse_gemini_response(&gemini("I cannot help with that.")),
            Err(OncoError::MalformedSuggestion { .. })
        ));
        let s = parse_gemini_response(&gemini("{\"priority\": 5}")).unwrap();
        assert_eq!(s.priority, Some(5));
    }

    // ── Requests ──────────────────────────────────────────────────────────────

    #[test]
    fn test_triage_prompt_mentions_vitals() {
        let prompt = triage_prompt(&intake());
        assert!(prompt.contains("Stage 3"));
        assert!(prompt.contains("38.7"));
        assert!(prompt.contains("96 bpm"));
        assert!(prompt.contains("\"priority\""));
    }

    #[test]
    fn test_gemini_request_url_and_body() {
        let req = request::gemini_request(&VendorSettings::triage_default(), "hello");
        assert_eq!(
            req.url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
        assert_eq!(req.body["contents"][0]["parts"][0]["text"], "hello");
        assert!(req.body.get("generationConfig").is_none());
        assert_eq!(req.timeout_secs, 10);
    }

    #[test]
    fn test_diagnosis_request_payload() {
        let form = HealthForm::new("150/95", "82.5", "headache, blurred vision").unwrap();
        let req = diagnosis_request(&VendorSettings::diagnosis_default(), &form);

        assert_eq!(req.body["model"], "mixtral-8x7b-32768");
        assert_eq!(req.body["temperature"], 0.7);
        assert_eq!(req.body["messages"][0]["role"], "user");
        let content = req.body["messages"][0]["content"].as_str().unwrap();
        assert!(content.contains("150/95"));
        assert!(content.contains("82.5 kg"));
    }

    #[test]
    fn test_health_form_rejects_bad_weight() {
        assert!(matches!(
            HealthForm::new("120/80", "heavy", "none"),
            Err(OncoError::InvalidField { .. })
        ));
        assert!(HealthForm::new("120/80", "-3", "none").is_err());
    }

    #[test]
    fn test_render_diagnosis_outcomes() {
        let ok = json!({ "choices": [{ "message": { "content": "Likely tension headache." } }] });
        assert_eq!(render_diagnosis(Ok(ok)), "Likely tension headache.");

        let down = render_diagnosis(Err(OncoError::AdvisorUnavailable {
            reason: "timed out".to_string(),
        }));
        assert!(down.starts_with("An error occurred while connecting to the AI service"));
        assert!(down.contains("timed out"));
    }

    // ── Settings ──────────────────────────────────────────────────────────────

    #[test]
    fn test_settings_default_without_table() {
        let s = AdvisorSettings::from_toml_str("[priority]\nbase = 1\n").unwrap();
        assert_eq!(s, AdvisorSettings::default());
    }

    #[test]
    fn test_settings_override() {
        let toml = r#"
            [advisor.triage]
            endpoint = "http://localhost:8080/models/"
            model = "local-model"
            timeout_secs = 3
        "#;
        let s = AdvisorSettings::from_toml_str(toml).unwrap();
        assert_eq!(s.triage.model, "local-model");
        assert_eq!(s.diagnosis, VendorSettings::diagnosis_default());

        let req = request::gemini_request(&s.triage, "x");
        assert_eq!(req.url, "http://localhost:8080/models/local-model:generateContent");
        assert_eq!(req.timeout_secs, 3);
    }

    #[test]
    fn test_settings_empty_model_rejected() {
        let toml = r#"
            [advisor.diagnosis]
            endpoint = "http://localhost"
            model = " "
        "#;
        assert!(matches!(
            AdvisorSettings::from_toml_str(toml),
            Err(OncoError::ConfigError { .. })
        ));
    }

    // ── Scripted advisors ─────────────────────────────────────────────────────

    #[test]
    fn test_scripted_advisor_plays_back_in_order() {
        let advisor = ScriptedAdvisor::new(
            VendorSettings::triage_default(),
            [
                ScriptedReply::Envelope(gemini("{\"priority\": 2, \"appointment\": \"2024-01-20\"}")),
                ScriptedReply::Failure("HTTP 503".to_string()),
            ],
        );
        let requests = advisor.requests();

        let first = advisor.suggest(&intake()).unwrap();
        assert_eq!(first.priority, Some(2));

        match advisor.suggest(&intake()) {
            Err(OncoError::AdvisorUnavailable { reason }) => assert_eq!(reason, "HTTP 503"),
            other => panic!("expected AdvisorUnavailable, got {:?}", other),
        }
        assert!(matches!(
            advisor.suggest(&intake()),
            Err(OncoError::AdvisorUnavailable { .. })
        ));

        let sent = requests.lock().unwrap();
        assert_eq!(sent.len(), 3, "every call builds and records a request");
        let prompt = sent[0].body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(!prompt.contains("Noor"), "the prompt carries clinical fields only");
        assert!(!prompt.contains("noor@example.org"));
    }

    #[test]
    fn test_unavailable_advisor() {
        let advisor = UnavailableAdvisor { reason: "no network".to_string() };
        assert!(matches!(
            advisor.suggest(&intake()),
            Err(OncoError::AdvisorUnavailable { .. })
        ));
    }
}
