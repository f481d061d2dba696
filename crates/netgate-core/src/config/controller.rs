//! Access controller configuration.

use serde::{Deserialize, Serialize};

/// Network access controller (credential issuance) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Issuer backend to use.
    #[serde(default)]
    pub provider: IssuerProvider,
    /// Base URL of the controller's management API
    /// (e.g. `https://192.168.1.100:8443/api/public/v9_1`).
    #[serde(default)]
    pub api_url: String,
    /// Management API username.
    #[serde(default)]
    pub username: String,
    /// Management API password.
    #[serde(default)]
    pub password: String,
    /// WLAN the issued guest passes are bound to.
    #[serde(default)]
    pub wlan_id: String,
    /// Port of the controller's captive-portal login form.
    #[serde(default = "default_portal_port")]
    pub portal_port: u16,
    /// Controller request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

/// Selectable credential issuer backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IssuerProvider {
    /// Real controller management API over HTTP.
    Http,
    /// Locally generated passes, for development without a controller.
    #[default]
    Mock,
}

impl std::fmt::Display for IssuerProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssuerProvider::Http => write!(f, "http"),
            IssuerProvider::Mock => write!(f, "mock"),
        }
    }
}

fn default_portal_port() -> u16 {
    9997
}

fn default_request_timeout() -> u64 {
    15
}
