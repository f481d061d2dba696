//! Admission orchestration.

pub mod engine;

pub use engine::{AdmissionEngine, AdmissionOutcome, Granted};
