//! Cooldown and daily-quota decision logic.

pub mod rate_limiter;

pub use rate_limiter::{DenialReason, RateDecision, RateLimiter};
