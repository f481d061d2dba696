//! Ephemeral grant model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A time-bounded access grant produced by a successful admission.
///
/// Not persisted beyond the access record and grant-log entry it leaves
/// behind. Expiry is fixed at issuance; a grant is discarded, never
/// renewed — a fresh admission attempt is required for a new one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grant {
    /// Opaque controller credential, absent when the caller supplied no
    /// device address (not connected through the controlled segment).
    pub credential: Option<String>,
    /// When the grant was issued.
    pub issued_at: DateTime<Utc>,
    /// Authoritative expiry: `issued_at` plus the fixed session duration.
    pub expires_at: DateTime<Utc>,
}

impl Grant {
    /// Create a grant issued now, expiring after `duration`.
    pub fn issue(credential: Option<String>, now: DateTime<Utc>, duration: Duration) -> Self {
        Self {
            credential,
            issued_at: now,
            expires_at: now + duration,
        }
    }

    /// Whether the grant has expired as of `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_is_issuance_plus_duration() {
        let now = Utc::now();
        let grant = Grant::issue(Some("PASS-123".into()), now, Duration::minutes(10));

        assert_eq!(grant.expires_at, now + Duration::minutes(10));
        assert!(!grant.is_expired(now));
        assert!(grant.is_expired(now + Duration::minutes(10)));
    }
}
