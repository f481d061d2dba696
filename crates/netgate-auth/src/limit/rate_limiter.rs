//! Pure admission rate limiting.
//!
//! The limiter is a function of the access record and the current instant.
//! It holds no clock and mutates nothing; the caller fetches the record,
//! asks for a decision, and persists updated state only after a grant.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use netgate_core::config::session::SessionConfig;
use netgate_entity::access::AccessRecord;

/// Why an admission attempt was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DenialReason {
    /// The cooldown interval since the last grant has not elapsed.
    Cooldown,
    /// The identity exhausted its daily grant quota.
    DailyLimit,
}

impl DenialReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DenialReason::Cooldown => "cooldown",
            DenialReason::DailyLimit => "daily-limit",
        }
    }
}

impl std::fmt::Display for DenialReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rate decision for one admission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    pub allowed: bool,
    /// How long until the identity may retry. Only meaningful for
    /// cooldown denials; quota denials carry no retry hint because the
    /// reset happens at the next calendar day.
    pub retry_after: Option<Duration>,
    pub reason: Option<DenialReason>,
}

impl RateDecision {
    fn allow() -> Self {
        Self {
            allowed: true,
            retry_after: None,
            reason: None,
        }
    }

    fn deny(reason: DenialReason, retry_after: Option<Duration>) -> Self {
        Self {
            allowed: false,
            retry_after,
            reason: Some(reason),
        }
    }
}

/// Cooldown-then-quota rate limiter over per-identity access records.
///
/// Checks are ordered: a request inside the cooldown window is reported
/// as a cooldown denial even when the daily quota is also exhausted.
#[derive(Debug, Clone, Copy)]
pub struct RateLimiter {
    cooldown: Duration,
    daily_limit: i32,
}

impl RateLimiter {
    pub fn new(cooldown: Duration, daily_limit: i32) -> Self {
        Self {
            cooldown,
            daily_limit,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(
            Duration::minutes(config.cooldown_minutes as i64),
            config.daily_limit as i32,
        )
    }

    /// Decide whether an identity may be granted access at `now`.
    ///
    /// Privileged identities bypass both checks unconditionally.
    pub fn check(
        &self,
        record: &AccessRecord,
        now: DateTime<Utc>,
        privileged: bool,
    ) -> RateDecision {
        if privileged {
            return RateDecision::allow();
        }

        if let Some(last) = record.last_grant_at {
            let elapsed = now - last;
            if elapsed < self.cooldown {
                return RateDecision::deny(DenialReason::Cooldown, Some(self.cooldown - elapsed));
            }
        }

        if record.daily_count_for(now.date_naive()) >= self.daily_limit {
            return RateDecision::deny(DenialReason::DailyLimit, None);
        }

        RateDecision::allow()
    }
}
