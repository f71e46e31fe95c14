//! TOML-driven triage policy.
//!
//! `TomlTriagePolicy` loads a `PolicyConfig` from a TOML string or file,
//! validates it, and implements the `TriagePolicy` trait from oncoqueue-core
//! by delegating to the scoring and scheduling rules.

use std::path::Path;

use chrono::NaiveDateTime;
use tracing::info;

use oncoqueue_contracts::{
    error::{OncoError, OncoResult},
    intake::PatientIntake,
    triage::{AppointmentDecision, Priority, PriorityDecision},
};
use oncoqueue_core::traits::TriagePolicy;

use crate::{config::PolicyConfig, schedule::resolve_appointment, scoring::resolve_priority};

/// A `TriagePolicy` whose thresholds come from a TOML document.
///
/// ```rust,ignore
/// use oncoqueue_policy::engine::TomlTriagePolicy;
///
/// let policy = TomlTriagePolicy::from_file(Path::new("policies/oncology.toml"))?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct TomlTriagePolicy {
    config: PolicyConfig,
}

impl TomlTriagePolicy {
    /// Build from an already-parsed configuration.
    ///
    /// Returns `OncoError::ConfigError` if the configuration fails validation.
    pub fn new(config: PolicyConfig) -> OncoResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Parse `s` as TOML and build a `TomlTriagePolicy`.
    ///
    /// Returns `OncoError::ConfigError` if the TOML is malformed, does not
    /// match `PolicyConfig`, or holds values the resolver cannot honour.
    pub fn from_toml_str(s: &str) -> OncoResult<Self> {
        let config: PolicyConfig = toml::from_str(s).map_err(|e| OncoError::ConfigError {
            reason: format!("failed to parse policy TOML: {}", e),
        })?;
        Self::new(config)
    }

    /// Read the file at `path` and parse it as a policy document.
    pub fn from_file(path: &Path) -> OncoResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| OncoError::ConfigError {
            reason: format!("failed to read policy file '{}': {}", path.display(), e),
        })?;
        let policy = Self::from_toml_str(&contents)?;
        info!(path = %path.display(), "triage policy loaded");
        Ok(policy)
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }
}

impl TriagePolicy for TomlTriagePolicy {
    fn prioritize(&self, intake: &PatientIntake, suggested: Option<i64>) -> PriorityDecision {
        resolve_priority(&self.config.priority, intake, suggested)
    }

    fn schedule(
        &self,
        priority: Priority,
        now: NaiveDateTime,
        suggested_date: Option<&str>,
    ) -> AppointmentDecision {
        resolve_appointment(
            &self.config.appointment,
            i64::from(priority.value()),
            now,
            suggested_date,
        )
    }
}
