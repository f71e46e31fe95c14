//! # oncoqueue-core
//!
//! The triage desk: takes an intake form, asks the advisor, resolves a
//! priority and appointment, and admits the patient to the treatment queue.
//!
//! This crate provides:
//! - The four seams (`Advisor`, `TriagePolicy`, `QueueWriter`, `Clock`)
//! - The `TriageDesk` that wires them together
//!
//! ## Usage
//!
//! ```rust,ignore
//! use oncoqueue_core::{TriageDesk, clock::SystemClock};
//!
//! let desk = TriageDesk::new(advisor, policy, queue, Box::new(SystemClock));
//! let admission = desk.admit(&body)?;
//! ```

pub mod clock;
pub mod desk;
pub mod traits;

pub use desk::{Admission, TriageDesk};
