//! Offline `Advisor` implementations.
//!
//! `ScriptedAdvisor` plays back canned vendor responses in order and keeps
//! every request it would have sent, so the full build → envelope → extract
//! path runs without a network. `UnavailableAdvisor` always fails.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing::debug;

use oncoqueue_contracts::{
    error::{OncoError, OncoResult},
    intake::PatientIntake,
    suggestion::AiSuggestion,
};
use oncoqueue_core::traits::Advisor;

use crate::{
    envelope::gemini_text,
    extract::extract_suggestion,
    request::{gemini_request, triage_prompt, AdvisorRequest},
    settings::VendorSettings,
};

/// Turn a Gemini response body into a suggestion.
///
/// Fails when the envelope is malformed or the text yields neither a
/// priority nor a date.
pub fn parse_gemini_response(envelope: &Value) -> OncoResult<AiSuggestion> {
    let text = gemini_text(envelope)?;
    let suggestion = extract_suggestion(&text);
    if suggestion.is_empty() {
        return Err(OncoError::MalformedSuggestion {
            reason: "no priority or appointment found in advisor text".to_string(),
        });
    }
    Ok(suggestion)
}

/// One scripted outcome.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// A response body, run through envelope validation and extraction.
    Envelope(Value),
    /// A transport-level failure (timeout, refused connection, HTTP error).
    Failure(String),
}

/// Plays back scripted replies, one per call.
pub struct ScriptedAdvisor {
    settings: VendorSettings,
    replies: Mutex<VecDeque<ScriptedReply>>,
    requests: Arc<Mutex<Vec<AdvisorRequest>>>,
}

impl ScriptedAdvisor {
    pub fn new(settings: VendorSettings, replies: impl IntoIterator<Item = ScriptedReply>) -> Self {
        Self {
            settings,
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle to the requests sent so far.
    pub fn requests(&self) -> Arc<Mutex<Vec<AdvisorRequest>>> {
        Arc::clone(&self.requests)
    }
}

impl Advisor for ScriptedAdvisor {
    fn suggest(&self, intake: &PatientIntake) -> OncoResult<AiSuggestion> {
        let request = gemini_request(&self.settings, &triage_prompt(intake));
        debug!(url = %request.url, "advisor request built");
        if let Ok(mut sent) = self.requests.lock() {
            sent.push(request);
        }

        let reply = self
            .replies
            .lock()
            .map_err(|e| OncoError::AdvisorUnavailable {
                reason: format!("script lock poisoned: {e}"),
            })?
            .pop_front();

        match reply {
            Some(ScriptedReply::Envelope(body)) => parse_gemini_response(&body),
            Some(ScriptedReply::Failure(reason)) => Err(OncoError::AdvisorUnavailable { reason }),
            None => Err(OncoError::AdvisorUnavailable {
                reason: "no scripted reply left".to_string(),
            }),
        }
    }
}

/// An advisor that is never reachable.
#[derive(Debug, Clone)]
pub struct UnavailableAdvisor {
    pub reason: String,
}

impl Advisor for UnavailableAdvisor {
    fn suggest(&self, _intake: &PatientIntake) -> OncoResult<AiSuggestion> {
        Err(OncoError::AdvisorUnavailable {
            reason: self.reason.clone(),
        })
    }
}
