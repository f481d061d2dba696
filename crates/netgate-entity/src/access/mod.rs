//! Per-identity access record.

pub mod record;

pub use record::AccessRecord;
