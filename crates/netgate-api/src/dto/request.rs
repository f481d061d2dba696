//! Request DTOs.

use serde::Deserialize;

/// One admission attempt from the portal client.
#[derive(Debug, Clone, Deserialize)]
pub struct AdmissionRequest {
    /// Identity provider token, verified server-side.
    pub token: String,
    /// Client MAC address. Absent when the portal redirect carried none;
    /// the attempt still runs, but no credential is issued.
    #[serde(default)]
    pub device_address: Option<String>,
    /// Controller host from the portal redirect, used to build the
    /// captive-portal form target for the client.
    #[serde(default)]
    pub controller_host: Option<String>,
}
