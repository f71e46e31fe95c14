//! Suggestion extraction from free model text.
//!
//! Models are asked for a bare JSON object but often wrap it in prose or code
//! fences. Extraction tries, in order:
//!
//! 1. the first `{ ... }` block (shortest match, may span lines) parsed as JSON
//! 2. if there is no block, or it is not valid JSON, plain-text patterns:
//!    - priority: `priority: N`, else the first standalone digit 1–5
//!    - date: the first `YYYY-MM-DD`

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use oncoqueue_contracts::suggestion::{coerce_priority, AiSuggestion};

fn json_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\{.*?\}").expect("json block pattern is valid"))
}

fn labelled_priority() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)priority[:\s]*([1-5])").expect("priority pattern is valid"))
}

fn bare_priority() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b([1-5])\b").expect("digit pattern is valid"))
}

fn iso_date() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("date pattern is valid"))
}

/// Pull a suggestion out of model text. Never fails; missing pieces are `None`.
pub fn extract_suggestion(text: &str) -> AiSuggestion {
    if let Some(block) = json_block().find(text) {
        match serde_json::from_str::<Value>(block.as_str()) {
            Ok(obj) => {
                debug!("advisor text carried a JSON object");
                return from_object(&obj);
            }
            Err(e) => debug!(error = %e, "JSON block did not parse, scanning text"),
        }
    }
    from_text(text)
}

fn from_object(obj: &Value) -> AiSuggestion {
    AiSuggestion {
        priority: obj.get("priority").and_then(|v| coerce_priority(v).ok()),
        appointment_date: obj
            .get("appointment")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

/// Plain-text fallback when no JSON object can be read.
pub fn from_text(text: &str) -> AiSuggestion {
    let priority = labelled_priority()
        .captures(text)
        .or_else(|| bare_priority().captures(text))
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok());

    AiSuggestion {
        priority,
        appointment_date: iso_date().find(text).map(|m| m.as_str().to_string()),
    }
}
