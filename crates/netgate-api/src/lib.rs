//! # netgate-api
//!
//! HTTP surface of NetGate: the admission endpoint the portal client
//! talks to, the admin grant listing, and health checks.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
