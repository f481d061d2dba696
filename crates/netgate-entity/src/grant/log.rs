//! Grant log entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::identity::{GrantRole, Identity};

/// One append-only log entry per successful admission.
///
/// Entries are written to one of two streams selected by the role snapshot
/// taken at grant time, and are never mutated or deleted by this system.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GrantLogEntry {
    /// Entry identifier.
    pub id: Uuid,
    /// Identity key (email).
    pub email: String,
    /// Display name at grant time.
    pub display_name: Option<String>,
    /// Avatar reference at grant time.
    pub avatar_url: Option<String>,
    /// Instant of the grant. Nullable so that entries with a missing or
    /// unparsable timestamp still surface in listings instead of being
    /// dropped; they sort last.
    pub granted_at: Option<DateTime<Utc>>,
    /// Role snapshot at grant time.
    pub role: GrantRole,
}

impl GrantLogEntry {
    /// Build a log entry for a grant issued to `identity` at `granted_at`.
    pub fn for_grant(identity: &Identity, role: GrantRole, granted_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: identity.email.clone(),
            display_name: Some(identity.name.clone()),
            avatar_url: identity.picture.clone(),
            granted_at: Some(granted_at),
            role,
        }
    }
}
