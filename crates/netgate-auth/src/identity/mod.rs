//! Server-side identity verification.
//!
//! The engine never trusts a client-asserted identity: the opaque bearer
//! token travels to the provider and comes back as a verified principal
//! or a rejection.

pub mod google;

use async_trait::async_trait;

use netgate_core::result::AppResult;
use netgate_entity::identity::Identity;

pub use google::GoogleTokenVerifier;

/// Verifies an opaque bearer token with the external identity provider.
#[async_trait]
pub trait IdentityVerifier: Send + Sync + 'static {
    /// Verify `token` and return the principal it belongs to.
    ///
    /// A rejected or malformed token yields an invalid-identity error;
    /// provider transport failures yield an external-service error.
    async fn verify(&self, token: &str) -> AppResult<Identity>;
}
