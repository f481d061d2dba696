//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;

use netgate_auth::{DenialReason, Granted};
use netgate_entity::grant::GrantLogEntry;
use netgate_entity::identity::GrantRole;

/// Outcome of an admission attempt.
///
/// Both arms ship with HTTP 200: a denial is a business answer the
/// portal renders, not a transport failure.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AdmissionResponse {
    Granted {
        user: UserProfile,
        role: GrantRole,
        /// Absent when no device address was supplied.
        #[serde(skip_serializing_if = "Option::is_none")]
        credential: Option<String>,
        expires_at: DateTime<Utc>,
        session_seconds: u64,
        /// Captive-portal form target, when the client can complete the
        /// handoff itself.
        #[serde(skip_serializing_if = "Option::is_none")]
        portal: Option<PortalHandoff>,
    },
    Denied {
        reason: DenialReason,
        #[serde(skip_serializing_if = "Option::is_none")]
        retry_after_seconds: Option<u64>,
        message: String,
    },
}

/// Verified identity snapshot echoed back to the portal.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

/// Everything the client needs to auto-submit the captive-portal form.
///
/// The portal expects a plain form POST with the pass as both username
/// and password.
#[derive(Debug, Clone, Serialize)]
pub struct PortalHandoff {
    pub submit_url: String,
    pub username: String,
    pub password: String,
    pub client_mac: String,
}

impl AdmissionResponse {
    /// Build a granted response, attaching the portal handoff when both a
    /// credential and a controller host are known.
    pub fn granted(
        granted: Granted,
        session_seconds: u64,
        device_address: Option<&str>,
        controller_host: Option<&str>,
        portal_port: u16,
    ) -> Self {
        let portal = match (&granted.grant.credential, controller_host, device_address) {
            (Some(pass), Some(host), Some(mac)) => Some(PortalHandoff {
                submit_url: format!("http://{host}:{portal_port}/login"),
                username: pass.clone(),
                password: pass.clone(),
                client_mac: mac.to_string(),
            }),
            _ => None,
        };

        Self::Granted {
            user: UserProfile {
                email: granted.identity.email,
                name: granted.identity.name,
                picture: granted.identity.picture,
            },
            role: granted.role,
            credential: granted.grant.credential,
            expires_at: granted.grant.expires_at,
            session_seconds,
            portal,
        }
    }

    /// Build a denial response with a human-readable message.
    pub fn denied(reason: DenialReason, retry_after: Option<chrono::Duration>) -> Self {
        let retry_after_seconds = retry_after.map(|d| d.num_seconds().max(0) as u64);
        let message = match reason {
            DenialReason::Cooldown => {
                // Round up so "59 seconds left" reads as one minute.
                let minutes = retry_after
                    .map(|d| (d.num_seconds().max(0) + 59) / 60)
                    .unwrap_or(1)
                    .max(1);
                format!("Try again in {minutes} minutes")
            }
            DenialReason::DailyLimit => {
                "Daily access limit reached. Try again tomorrow".to_string()
            }
        };

        Self::Denied {
            reason,
            retry_after_seconds,
            message,
        }
    }
}

/// One row of the admin grant listing.
#[derive(Debug, Clone, Serialize)]
pub struct GrantEntryResponse {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granted_at: Option<DateTime<Utc>>,
    pub role: GrantRole,
    /// Whether the granted session window is still open.
    pub active: bool,
}

impl GrantEntryResponse {
    /// Project a log entry, resolving `active` as grant recency against
    /// the session window.
    pub fn from_entry(entry: GrantLogEntry, now: DateTime<Utc>, session_minutes: u64) -> Self {
        let active = entry
            .granted_at
            .map(|at| now - at < chrono::Duration::minutes(session_minutes as i64))
            .unwrap_or(false);

        Self {
            email: entry.email,
            display_name: entry.display_name,
            avatar_url: entry.avatar_url,
            granted_at: entry.granted_at,
            role: entry.role,
            active,
        }
    }
}
