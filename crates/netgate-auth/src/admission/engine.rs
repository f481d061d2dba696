//! The admission engine.
//!
//! One admission attempt moves through a fixed pipeline: verify the
//! identity, resolve privilege, apply rate limits, issue the credential,
//! then record the grant. Ordering matters: nothing is persisted before
//! the credential exists, so a denial or an issuer failure leaves no
//! trace in the store. The one asymmetry is after issuance: the
//! controller has already granted network access at that point, so a
//! failed record write is logged loudly but still reported as a grant.

use std::sync::Arc;

use chrono::{Duration, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use netgate_core::config::session::SessionConfig;
use netgate_core::result::AppResult;
use netgate_entity::access::AccessRecord;
use netgate_entity::grant::{Grant, GrantLogEntry};
use netgate_entity::identity::{GrantRole, Identity};

use crate::identity::IdentityVerifier;
use crate::issuer::{CredentialIssuer, IssuedCredential};
use crate::limit::{DenialReason, RateLimiter};
use crate::session::SessionStore;

/// A successful admission.
#[derive(Debug, Clone)]
pub struct Granted {
    pub identity: Identity,
    pub role: GrantRole,
    pub grant: Grant,
}

/// Business outcome of one admission attempt.
///
/// A denial is a normal answer, not an error: transport-level failures
/// (invalid token, unreachable issuer, broken store reads) surface as
/// `AppError` instead.
#[derive(Debug, Clone)]
pub enum AdmissionOutcome {
    Granted(Granted),
    Denied {
        reason: DenialReason,
        retry_after: Option<Duration>,
    },
}

/// Orchestrates admission attempts end to end.
pub struct AdmissionEngine {
    verifier: Arc<dyn IdentityVerifier>,
    issuer: Arc<dyn CredentialIssuer>,
    store: Arc<dyn SessionStore>,
    limiter: RateLimiter,
    session_duration: Duration,
    serialize_per_identity: bool,
    identity_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl AdmissionEngine {
    pub fn new(
        verifier: Arc<dyn IdentityVerifier>,
        issuer: Arc<dyn CredentialIssuer>,
        store: Arc<dyn SessionStore>,
        config: &SessionConfig,
    ) -> Self {
        Self {
            verifier,
            issuer,
            store,
            limiter: RateLimiter::from_config(config),
            session_duration: Duration::minutes(config.session_minutes as i64),
            serialize_per_identity: config.serialize_per_identity,
            identity_locks: DashMap::new(),
        }
    }

    /// Run one admission attempt for the bearer of `token`.
    pub async fn admit(&self, token: &str, device_address: &str) -> AppResult<AdmissionOutcome> {
        let identity = self.verifier.verify(token).await?;

        if !self.serialize_per_identity {
            return self.admit_verified(identity, device_address).await;
        }

        // Holding the lock across the issuer call serializes concurrent
        // attempts for one identity; without it the read-modify-write on
        // the record can over-grant by one under contention.
        let key = identity.email.to_lowercase();
        let guard = self.identity_lock(&key).lock_owned().await;
        let outcome = self.admit_verified(identity, device_address).await;
        drop(guard);

        // Uncontended entries are evicted so the lock map tracks only
        // identities with in-flight attempts. The map's own Arc is the
        // last one standing once every guard and waiter is gone.
        self.identity_locks
            .remove_if(&key, |_, lock| Arc::strong_count(lock) == 1);

        outcome
    }

    async fn admit_verified(
        &self,
        identity: Identity,
        device_address: &str,
    ) -> AppResult<AdmissionOutcome> {
        let now = Utc::now();

        let mut record = self
            .store
            .find_record(&identity.email)
            .await?
            .unwrap_or_else(|| AccessRecord::zero_state(&identity.email));

        let privileged = self.store.is_privileged(&identity.email).await?;
        let role = if privileged {
            GrantRole::Admin
        } else {
            GrantRole::Standard
        };

        let decision = self.limiter.check(&record, now, privileged);
        if !decision.allowed {
            let reason = decision.reason.unwrap_or(DenialReason::Cooldown);
            info!(email = %identity.email, reason = %reason, "Admission denied");
            return Ok(AdmissionOutcome::Denied {
                reason,
                retry_after: decision.retry_after,
            });
        }

        // Fallible and side-effecting on the controller; nothing has been
        // written to the store yet, so an error here leaves admission
        // state untouched.
        let issued = self.issuer.issue(&identity.name, device_address).await?;
        let credential = match issued {
            IssuedCredential::Pass(key) => Some(key),
            IssuedCredential::NotApplicable => None,
        };
        let grant = Grant::issue(credential, now, self.session_duration);

        record.display_name = Some(identity.name.clone());
        record.avatar_url = identity.picture.clone();
        record.last_grant_at = Some(now);
        record.daily_grant_count = record.daily_count_for(now.date_naive()) + 1;
        record.grant_date = Some(now.date_naive());

        // The controller has already granted access. A failed write means
        // this identity may evade rate limiting until the store recovers;
        // that under-counts rather than over-denies, so report the grant
        // and leave a loud trail for reconciliation.
        if let Err(e) = self.store.upsert_record(&record).await {
            error!(email = %identity.email, error = %e,
                "Access record write failed after credential issuance");
        }

        let entry = GrantLogEntry::for_grant(&identity, role, now);
        if let Err(e) = self.store.append_grant_log(&entry).await {
            warn!(email = %identity.email, error = %e, "Grant log append failed");
        }

        info!(email = %identity.email, role = %role, "Admission granted");
        Ok(AdmissionOutcome::Granted(Granted {
            identity,
            role,
            grant,
        }))
    }

    fn identity_lock(&self, key: &str) -> Arc<Mutex<()>> {
        self.identity_locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
