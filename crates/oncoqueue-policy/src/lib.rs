//! # oncoqueue-policy
//!
//! The triage resolver: fallback priority scoring, priority validation and
//! appointment resolution, configured from TOML.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use oncoqueue_policy::engine::TomlTriagePolicy;
//!
//! let policy = TomlTriagePolicy::from_file(Path::new("policies/oncology.toml"))?;
//! // Pass `policy` to `oncoqueue_core::TriageDesk::new(...)`.
//! ```
//!
//! Every function here is total: malformed stages, unreadable priorities and
//! bad advisor dates all fall back to a defined value.

pub mod config;
pub mod engine;
pub mod schedule;
pub mod scoring;

pub use config::{AppointmentRules, OffsetRule, PolicyConfig, PriorityRules};
pub use engine::TomlTriagePolicy;
pub use schedule::resolve_appointment;
pub use scoring::{fallback_priority, resolve_priority, validate_priority};

// ── Tests ─────────────────────────────────────────────────────────────────────
