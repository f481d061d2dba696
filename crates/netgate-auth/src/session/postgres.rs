//! Postgres-backed session store.

use async_trait::async_trait;
use sqlx::PgPool;

use netgate_core::result::AppResult;
use netgate_database::repositories::{
    AccessRecordRepository, AllowlistRepository, GrantLogRepository,
};
use netgate_entity::access::AccessRecord;
use netgate_entity::grant::GrantLogEntry;

use super::SessionStore;

/// Session store over the Postgres repositories.
#[derive(Debug, Clone)]
pub struct PgSessionStore {
    records: AccessRecordRepository,
    grant_logs: GrantLogRepository,
    allowlist: AllowlistRepository,
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            records: AccessRecordRepository::new(pool.clone()),
            grant_logs: GrantLogRepository::new(pool.clone()),
            allowlist: AllowlistRepository::new(pool),
        }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn find_record(&self, email: &str) -> AppResult<Option<AccessRecord>> {
        self.records.find_by_email(email).await
    }

    async fn upsert_record(&self, record: &AccessRecord) -> AppResult<()> {
        self.records.upsert(record).await
    }

    async fn append_grant_log(&self, entry: &GrantLogEntry) -> AppResult<()> {
        self.grant_logs.append(entry).await
    }

    async fn list_grant_logs(&self) -> AppResult<Vec<GrantLogEntry>> {
        self.grant_logs.list_merged().await
    }

    async fn is_privileged(&self, email: &str) -> AppResult<bool> {
        self.allowlist.exists(email).await
    }
}
