//! Guest-pass issuance through the controller management API.
//!
//! The controller uses a two-step flow: authenticate for a short-lived
//! service ticket, then create a guest pass bound to the configured WLAN.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use netgate_core::config::controller::ControllerConfig;
use netgate_core::error::AppError;
use netgate_core::result::AppResult;

use super::{CredentialIssuer, IssuedCredential};

#[derive(Debug, Serialize)]
struct ServiceTicketRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceTicketResponse {
    service_ticket: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GuestPassRequest<'a> {
    guestpass_name: &'a str,
    duration: u64,
    duration_type: &'a str,
    wlan_id: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GuestPassResponse {
    guestpass_key: String,
}

/// Issues guest passes through the controller's management API.
#[derive(Debug, Clone)]
pub struct ControllerCredentialIssuer {
    http: reqwest::Client,
    config: ControllerConfig,
    /// Pass validity in minutes, mirrored from the session duration.
    duration_minutes: u64,
}

impl ControllerCredentialIssuer {
    /// Create a new issuer from controller configuration.
    pub fn new(config: ControllerConfig, duration_minutes: u64) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_seconds))
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| {
                AppError::configuration(format!("Failed to build controller HTTP client: {e}"))
            })?;

        Ok(Self {
            http,
            config,
            duration_minutes,
        })
    }

    /// Authenticate against the management API for a service ticket.
    async fn service_ticket(&self) -> AppResult<String> {
        let url = format!("{}/serviceTicket", self.config.api_url);
        let response = self
            .http
            .post(&url)
            .json(&ServiceTicketRequest {
                username: &self.config.username,
                password: &self.config.password,
            })
            .send()
            .await
            .map_err(|e| AppError::issuer_unavailable(format!("Controller unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::issuer_unavailable(format!(
                "Controller login failed with status {}",
                response.status()
            )));
        }

        let ticket: ServiceTicketResponse = response.json().await.map_err(|e| {
            AppError::issuer_unavailable(format!("Malformed controller login response: {e}"))
        })?;

        debug!("Obtained controller service ticket");
        Ok(ticket.service_ticket)
    }
}

#[async_trait]
impl CredentialIssuer for ControllerCredentialIssuer {
    async fn issue(
        &self,
        display_name: &str,
        device_address: &str,
    ) -> AppResult<IssuedCredential> {
        if device_address.trim().is_empty() {
            debug!("No device address supplied, skipping credential issuance");
            return Ok(IssuedCredential::NotApplicable);
        }

        let ticket = self.service_ticket().await?;

        let url = format!("{}/identity/guestpass", self.config.api_url);
        let response = self
            .http
            .post(&url)
            .query(&[("serviceTicket", ticket.as_str())])
            .json(&GuestPassRequest {
                guestpass_name: display_name,
                duration: self.duration_minutes,
                duration_type: "Minutes",
                wlan_id: &self.config.wlan_id,
            })
            .send()
            .await
            .map_err(|e| AppError::issuer_unavailable(format!("Controller unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::issuer_unavailable(format!(
                "Guest pass creation failed with status {}",
                response.status()
            )));
        }

        let pass: GuestPassResponse = response.json().await.map_err(|e| {
            AppError::issuer_unavailable(format!("Malformed guest pass response: {e}"))
        })?;

        info!(name = %display_name, "Guest pass issued");
        Ok(IssuedCredential::Pass(pass.guestpass_key))
    }
}
