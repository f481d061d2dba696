//! Access record repository implementation.

use sqlx::PgPool;

use netgate_core::error::{AppError, ErrorKind};
use netgate_core::result::AppResult;
use netgate_entity::access::AccessRecord;

/// Repository for per-identity access records.
#[derive(Debug, Clone)]
pub struct AccessRecordRepository {
    pool: PgPool,
}

impl AccessRecordRepository {
    /// Create a new access record repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the record for an identity key.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<AccessRecord>> {
        sqlx::query_as::<_, AccessRecord>(
            "SELECT * FROM access_records WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find access record", e)
        })
    }

    /// Upsert a record with merge semantics.
    ///
    /// Only the grant-tracking fields and the identity snapshot are
    /// overwritten; `created_at` and anything else on an existing row is
    /// preserved.
    pub async fn upsert(&self, record: &AccessRecord) -> AppResult<()> {
        sqlx::query(
            r#"INSERT INTO access_records
                   (email, display_name, avatar_url, last_grant_at, grant_date,
                    daily_grant_count, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
               ON CONFLICT (email) DO UPDATE SET
                   display_name = EXCLUDED.display_name,
                   avatar_url = EXCLUDED.avatar_url,
                   last_grant_at = EXCLUDED.last_grant_at,
                   grant_date = EXCLUDED.grant_date,
                   daily_grant_count = EXCLUDED.daily_grant_count,
                   updated_at = NOW()"#,
        )
        .bind(&record.email)
        .bind(&record.display_name)
        .bind(&record.avatar_url)
        .bind(record.last_grant_at)
        .bind(record.grant_date)
        .bind(record.daily_grant_count)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to upsert access record", e)
        })?;

        Ok(())
    }
}
