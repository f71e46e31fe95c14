//! Vendor settings for the advisor and the diagnosis helper.
//!
//! Read from the `[advisor.triage]` and `[advisor.diagnosis]` tables of the
//! clinic TOML. Credentials are not settings: a host that performs the HTTP
//! call supplies its key when it builds the client.

use serde::{Deserialize, Serialize};

use oncoqueue_contracts::error::{OncoError, OncoResult};

/// One model endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorSettings {
    /// Base URL. For the triage advisor the model name is appended.
    pub endpoint: String,
    pub model: String,
    /// Sampling temperature, sent only when set.
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl VendorSettings {
    /// Gemini `generateContent`, used for priority/date suggestions.
    pub fn triage_default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            model: "gemini-2.0-flash".to_string(),
            temperature: None,
            timeout_secs: default_timeout_secs(),
        }
    }

    /// OpenAI-compatible chat completions, used for diagnosis prose.
    pub fn diagnosis_default() -> Self {
        Self {
            endpoint: "https://api.groq.com/openai/v1/chat/completions".to_string(),
            model: "mixtral-8x7b-32768".to_string(),
            temperature: Some(0.7),
            timeout_secs: 30,
        }
    }
}

/// The `[advisor]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorSettings {
    #[serde(default = "VendorSettings::triage_default")]
    pub triage: VendorSettings,
    #[serde(default = "VendorSettings::diagnosis_default")]
    pub diagnosis: VendorSettings,
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        Self {
            triage: VendorSettings::triage_default(),
            diagnosis: VendorSettings::diagnosis_default(),
        }
    }
}

#[derive(Deserialize)]
struct Document {
    #[serde(default)]
    advisor: AdvisorSettings,
}

impl AdvisorSettings {
    /// Read the `[advisor]` table from a TOML document, ignoring every other
    /// table. A document without one yields the defaults.
    pub fn from_toml_str(s: &str) -> OncoResult<Self> {
        let doc: Document = toml::from_str(s).map_err(|e| OncoError::ConfigError {
            reason: format!("failed to parse advisor settings: {}", e),
        })?;
        for vendor in [&doc.advisor.triage, &doc.advisor.diagnosis] {
            if vendor.endpoint.trim().is_empty() || vendor.model.trim().is_empty() {
                return Err(OncoError::ConfigError {
                    reason: "advisor endpoint and model must not be empty".to_string(),
                });
            }
        }
        Ok(doc.advisor)
    }
}
