//! Credential issuance against the network access controller.

pub mod controller;
pub mod mock;

use async_trait::async_trait;

use netgate_core::result::AppResult;

pub use controller::ControllerCredentialIssuer;
pub use mock::MockCredentialIssuer;

/// Outcome of a credential issuance request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssuedCredential {
    /// A time-boxed guest pass usable against the captive portal.
    Pass(String),
    /// No credential applies, typically because the client supplied no
    /// device address. This is a normal business outcome, not a failure.
    NotApplicable,
}

impl IssuedCredential {
    /// The pass value, if one was issued.
    pub fn into_pass(self) -> Option<String> {
        match self {
            IssuedCredential::Pass(key) => Some(key),
            IssuedCredential::NotApplicable => None,
        }
    }
}

/// Issues network credentials for admitted identities.
#[async_trait]
pub trait CredentialIssuer: Send + Sync + 'static {
    /// Issue a credential for the named principal and device.
    ///
    /// An empty `device_address` yields [`IssuedCredential::NotApplicable`]
    /// without contacting the controller. Controller failures surface as
    /// issuer-unavailable errors and must leave no admission side effects.
    async fn issue(&self, display_name: &str, device_address: &str)
    -> AppResult<IssuedCredential>;
}
