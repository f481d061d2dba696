//! # netgate-entity
//!
//! Domain models for NetGate. Entities are plain data carriers with
//! serde and sqlx derives; all behaviour lives in `netgate-auth`.

pub mod access;
pub mod grant;
pub mod identity;

pub use access::AccessRecord;
pub use grant::{Grant, GrantLogEntry};
pub use identity::{GrantRole, Identity};
