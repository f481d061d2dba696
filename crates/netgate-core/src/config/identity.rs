//! Identity provider configuration.

use serde::{Deserialize, Serialize};

/// OAuth identity verification configuration.
///
/// Bearer tokens presented by clients are verified server-side against the
/// provider's tokeninfo endpoint; a client-asserted identity is never trusted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// OAuth client ID the token audience must match.
    pub client_id: String,
    /// Tokeninfo endpoint used to verify ID tokens.
    #[serde(default = "default_tokeninfo_url")]
    pub tokeninfo_url: String,
    /// Verification request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_tokeninfo_url() -> String {
    "https://oauth2.googleapis.com/tokeninfo".to_string()
}

fn default_request_timeout() -> u64 {
    10
}
