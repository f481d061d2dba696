//! Access record entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Mutable per-identity admission state, upserted on every successful grant.
///
/// The daily count is never reset by a background job: whenever `grant_date`
/// differs from the current calendar day (UTC), the effective count is zero.
/// [`AccessRecord::daily_count_for`] computes that at read time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AccessRecord {
    /// Identity key (email).
    pub email: String,
    /// Display name as of the last grant.
    pub display_name: Option<String>,
    /// Avatar reference as of the last grant.
    pub avatar_url: Option<String>,
    /// Instant of the most recent successful grant.
    pub last_grant_at: Option<DateTime<Utc>>,
    /// Calendar day (UTC) of the most recent grant.
    pub grant_date: Option<NaiveDate>,
    /// Number of grants issued on `grant_date`.
    pub daily_grant_count: i32,
    /// When the record was first created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl AccessRecord {
    /// A zero-state record for an identity with no prior grants.
    pub fn zero_state(email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            email: email.into(),
            display_name: None,
            avatar_url: None,
            last_grant_at: None,
            grant_date: None,
            daily_grant_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Effective grant count for the given calendar day.
    ///
    /// Stale counts from previous days read as zero; stored counts are
    /// clamped so the effective value is never negative.
    pub fn daily_count_for(&self, day: NaiveDate) -> i32 {
        if self.grant_date == Some(day) {
            self.daily_grant_count.max(0)
        } else {
            0
        }
    }
}
