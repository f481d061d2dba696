//! Google ID-token verification via the OAuth tokeninfo endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use netgate_core::config::identity::IdentityConfig;
use netgate_core::error::AppError;
use netgate_core::result::AppResult;
use netgate_entity::identity::Identity;

use super::IdentityVerifier;

/// Claims returned by the tokeninfo endpoint that we care about.
#[derive(Debug, Deserialize)]
struct TokenInfo {
    aud: String,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
    email_verified: Option<String>,
}

/// Verifies Google ID tokens server-side against the tokeninfo endpoint.
#[derive(Debug, Clone)]
pub struct GoogleTokenVerifier {
    /// Shared HTTP client.
    http: reqwest::Client,
    /// Identity provider configuration.
    config: IdentityConfig,
}

impl GoogleTokenVerifier {
    /// Create a new verifier from configuration.
    pub fn new(config: IdentityConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::configuration(format!("Failed to build identity HTTP client: {e}"))
            })?;

        Ok(Self { http, config })
    }
}

#[async_trait]
impl IdentityVerifier for GoogleTokenVerifier {
    async fn verify(&self, token: &str) -> AppResult<Identity> {
        let response = self
            .http
            .get(&self.config.tokeninfo_url)
            .query(&[("id_token", token)])
            .send()
            .await
            .map_err(|e| {
                AppError::external_service(format!("Identity provider unreachable: {e}"))
            })?;

        // The endpoint answers 4xx for any rejected token.
        if !response.status().is_success() {
            warn!(status = %response.status(), "Identity token rejected by provider");
            return Err(AppError::invalid_identity("Invalid identity token"));
        }

        let info: TokenInfo = response.json().await.map_err(|e| {
            AppError::external_service(format!("Malformed tokeninfo response: {e}"))
        })?;

        if info.aud != self.config.client_id {
            warn!(aud = %info.aud, "Identity token audience mismatch");
            return Err(AppError::invalid_identity("Invalid identity token"));
        }

        if info.email_verified.as_deref() == Some("false") {
            return Err(AppError::invalid_identity("Email address is not verified"));
        }

        let email = info
            .email
            .ok_or_else(|| AppError::invalid_identity("Identity token carries no email"))?;
        let name = info.name.unwrap_or_else(|| email.clone());

        debug!(email = %email, "Identity verified");
        Ok(Identity::new(email, name, info.picture))
    }
}
