//! # oncoqueue-contracts
//!
//! Shared types, wire formats, and errors for the oncoqueue triage desk.
//!
//! All crates in the workspace import from here. No triage logic lives in
//! this crate, only data definitions, intake validation, and error types.

pub mod admission;
pub mod error;
pub mod intake;
pub mod suggestion;
pub mod timestamp;
pub mod triage;
