//! Vendor response envelopes.
//!
//! The triage advisor's envelope is checked structurally with a JSON Schema
//! before any text is pulled out of it. A response that does not match is an
//! advisor failure, never a partial suggestion.

use std::sync::OnceLock;

use jsonschema::Validator;
use serde_json::{json, Value};
use tracing::warn;

use oncoqueue_contracts::error::{OncoError, OncoResult};

/// Text used when a chat completion carries no message content.
pub const NO_RESPONSE: &str = "No response";

/// `candidates[0].content.parts[0].text` must exist and be a string.
fn gemini_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "required": ["candidates"],
        "properties": {
            "candidates": {
                "type": "array",
                "minItems": 1,
                "prefixItems": [{
                    "type": "object",
                    "required": ["content"],
                    "properties": {
                        "content": {
                            "type": "object",
                            "required": ["parts"],
                            "properties": {
                                "parts": {
                                    "type": "array",
                                    "minItems": 1,
                                    "prefixItems": [{
                                        "type": "object",
                                        "required": ["text"],
                                        "properties": { "text": { "type": "string" } }
                                    }]
                                }
                            }
                        }
                    }
                }]
            }
        }
    })
}

pub(crate) fn gemini_validator() -> &'static Validator {
    static VALIDATOR: OnceLock<Validator> = OnceLock::new();
    VALIDATOR.get_or_init(|| {
        jsonschema::validator_for(&gemini_schema()).expect("envelope schema is valid")
    })
}

/// Validate a Gemini `generateContent` response and return its first text
/// part, trimmed.
pub fn gemini_text(envelope: &Value) -> OncoResult<String> {
    let violations: Vec<String> = gemini_validator()
        .iter_errors(envelope)
        .map(|e| format!("{} at {}", e, e.instance_path))
        .collect();
    if !violations.is_empty() {
        let reason = format!("unexpected API response structure: {}", violations.join("; "));
        warn!(%reason, "advisor envelope rejected");
        return Err(OncoError::MalformedSuggestion { reason });
    }

    envelope
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(|t| t.trim().to_string())
        .ok_or_else(|| OncoError::MalformedSuggestion {
            reason: "unexpected API response structure".to_string(),
        })
}

/// The first choice's message content of a chat completion, or
/// [`NO_RESPONSE`].
pub fn chat_text(response: &Value) -> String {
    response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .unwrap_or(NO_RESPONSE)
        .to_string()
}
