//! Admin allow-list repository implementation.

use sqlx::PgPool;

use netgate_core::error::{AppError, ErrorKind};
use netgate_core::result::AppResult;

/// Repository for the privileged-identity allow-list.
///
/// Absence of an entry means non-privileged; that is a normal answer,
/// never an error.
#[derive(Debug, Clone)]
pub struct AllowlistRepository {
    pool: PgPool,
}

impl AllowlistRepository {
    /// Create a new allow-list repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Check whether an identity key is on the allow-list.
    pub async fn exists(&self, email: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM admin_allowlist WHERE LOWER(email) = LOWER($1))",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check allow-list", e))
    }
}
