//! Grant role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role snapshot taken at the time of a grant.
///
/// Threaded explicitly through the admission engine and the session store;
/// it selects which grant-log stream an entry is appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "grant_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GrantRole {
    /// Privileged identity, exempt from rate limits.
    Admin,
    /// Regular guest or student identity.
    Standard,
}

impl GrantRole {
    /// Check if this role is privileged.
    pub fn is_privileged(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Standard => "standard",
        }
    }
}

impl fmt::Display for GrantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GrantRole {
    type Err = netgate_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "standard" => Ok(Self::Standard),
            _ => Err(netgate_core::AppError::validation(format!(
                "Invalid grant role: '{s}'. Expected one of: admin, standard"
            ))),
        }
    }
}
