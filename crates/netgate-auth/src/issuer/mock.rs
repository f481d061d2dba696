//! Locally generated credentials for development without a controller.

use async_trait::async_trait;
use rand::RngExt;
use tracing::debug;

use netgate_core::result::AppResult;

use super::{CredentialIssuer, IssuedCredential};

/// Issues random passes without any network calls. Never fails.
#[derive(Debug, Clone, Default)]
pub struct MockCredentialIssuer;

impl MockCredentialIssuer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CredentialIssuer for MockCredentialIssuer {
    async fn issue(
        &self,
        _display_name: &str,
        device_address: &str,
    ) -> AppResult<IssuedCredential> {
        if device_address.trim().is_empty() {
            debug!("No device address supplied, skipping credential issuance");
            return Ok(IssuedCredential::NotApplicable);
        }

        let key: u32 = rand::rng().random_range(0..100_000);
        Ok(IssuedCredential::Pass(format!("PASS-{key:05}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_pass_shape() {
        let issuer = MockCredentialIssuer::new();
        let issued = issuer.issue("Guest", "aa:bb:cc:dd:ee:ff").await.unwrap();
        match issued {
            IssuedCredential::Pass(key) => {
                assert!(key.starts_with("PASS-"));
                assert_eq!(key.len(), "PASS-".len() + 5);
            }
            IssuedCredential::NotApplicable => panic!("expected a pass"),
        }
    }

    #[tokio::test]
    async fn test_empty_device_address_yields_no_credential() {
        let issuer = MockCredentialIssuer::new();
        let issued = issuer.issue("Guest", "  ").await.unwrap();
        assert_eq!(issued, IssuedCredential::NotApplicable);
    }
}
