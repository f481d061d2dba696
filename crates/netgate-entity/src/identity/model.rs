//! Identity entity model.

use serde::{Deserialize, Serialize};

/// A verified user principal.
///
/// Identities are established by the external identity provider on every
/// admission attempt; nothing here is client-asserted. The privileged flag
/// is intentionally absent: it is re-resolved from the allow-list on each
/// attempt so promotions and demotions take effect immediately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique identity key (email).
    pub email: String,
    /// Human-readable display name.
    pub name: String,
    /// Avatar image reference.
    pub picture: Option<String>,
}

impl Identity {
    /// Create a new identity.
    pub fn new(email: impl Into<String>, name: impl Into<String>, picture: Option<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            picture,
        }
    }
}
