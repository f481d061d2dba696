//! Grant log repository implementation.
//!
//! Two physically separate append-only streams, selected by the role
//! snapshot on each entry. Listing merges both streams newest-first.

use sqlx::PgPool;

use netgate_core::error::{AppError, ErrorKind};
use netgate_core::result::AppResult;
use netgate_entity::grant::GrantLogEntry;
use netgate_entity::identity::GrantRole;

/// Repository for the append-only grant log streams.
#[derive(Debug, Clone)]
pub struct GrantLogRepository {
    pool: PgPool,
}

impl GrantLogRepository {
    /// Create a new grant log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append an entry to the stream selected by its role snapshot.
    pub async fn append(&self, entry: &GrantLogEntry) -> AppResult<()> {
        let table = stream_table(entry.role);
        let sql = format!(
            "INSERT INTO {table} (id, email, display_name, avatar_url, granted_at, role)
             VALUES ($1, $2, $3, $4, $5, $6)"
        );

        sqlx::query(&sql)
            .bind(entry.id)
            .bind(&entry.email)
            .bind(&entry.display_name)
            .bind(&entry.avatar_url)
            .bind(entry.granted_at)
            .bind(entry.role)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to append grant log entry", e)
            })?;

        Ok(())
    }

    /// List all entries across both streams, most recent first.
    ///
    /// Entries without a timestamp sort last rather than being dropped.
    pub async fn list_merged(&self) -> AppResult<Vec<GrantLogEntry>> {
        sqlx::query_as::<_, GrantLogEntry>(
            r#"SELECT id, email, display_name, avatar_url, granted_at, role
                 FROM admin_grant_logs
               UNION ALL
               SELECT id, email, display_name, avatar_url, granted_at, role
                 FROM standard_grant_logs
               ORDER BY granted_at DESC NULLS LAST"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list grant logs", e))
    }
}

/// Table backing a role's log stream.
fn stream_table(role: GrantRole) -> &'static str {
    match role {
        GrantRole::Admin => "admin_grant_logs",
        GrantRole::Standard => "standard_grant_logs",
    }
}
