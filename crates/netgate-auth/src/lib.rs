//! # netgate-auth
//!
//! Admission control and session lifecycle for NetGate.
//!
//! ## Modules
//!
//! - `limit` — pure cooldown and daily-quota decision logic
//! - `identity` — server-side identity-token verification
//! - `issuer` — credential issuance against the access controller
//! - `session` — session store (Postgres and in-memory) and the client countdown timer
//! - `admission` — the admission engine orchestrating all of the above

pub mod admission;
pub mod identity;
pub mod issuer;
pub mod limit;
pub mod session;

pub use admission::{AdmissionEngine, AdmissionOutcome, Granted};
pub use identity::{GoogleTokenVerifier, IdentityVerifier};
pub use issuer::{ControllerCredentialIssuer, CredentialIssuer, IssuedCredential, MockCredentialIssuer};
pub use limit::{DenialReason, RateDecision, RateLimiter};
pub use session::{MemorySessionStore, PgSessionStore, SessionStore, SessionTimer, TimerState};
