//! Session, cooldown, and daily-quota configuration.

use serde::{Deserialize, Serialize};

/// Admission and session lifecycle configuration.
///
/// The session duration doubles as the credential validity window; the
/// controller enforces the same duration independently, so clock skew on
/// the client side never extends real network access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Length of a granted session in minutes.
    #[serde(default = "default_session_minutes")]
    pub session_minutes: u64,
    /// Minimum interval between successive grants for one identity, in minutes.
    #[serde(default = "default_cooldown_minutes")]
    pub cooldown_minutes: u64,
    /// Maximum grants per identity per calendar day (UTC).
    #[serde(default = "default_daily_limit")]
    pub daily_limit: u32,
    /// Serialize admission attempts per identity through a per-key mutex.
    ///
    /// Off by default: the read-modify-write race on the access record is an
    /// accepted weak point (at most one extra grant under contention). Enabling
    /// this holds the identity's lock across the issuer call, trading latency
    /// under contention for strict quota enforcement.
    #[serde(default)]
    pub serialize_per_identity: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_minutes: default_session_minutes(),
            cooldown_minutes: default_cooldown_minutes(),
            daily_limit: default_daily_limit(),
            serialize_per_identity: false,
        }
    }
}

fn default_session_minutes() -> u64 {
    10
}

fn default_cooldown_minutes() -> u64 {
    10
}

fn default_daily_limit() -> u32 {
    3
}
