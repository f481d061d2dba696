//! Grants and the append-only grant log.

pub mod log;
pub mod model;

pub use log::GrantLogEntry;
pub use model::Grant;
