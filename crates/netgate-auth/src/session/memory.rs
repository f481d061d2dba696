//! In-memory session store for tests and local development.

use std::cmp::Ordering;
use std::sync::Mutex;

use async_trait::async_trait;
use dashmap::{DashMap, DashSet};

use netgate_core::result::AppResult;
use netgate_entity::access::AccessRecord;
use netgate_entity::grant::GrantLogEntry;
use netgate_entity::identity::GrantRole;

use super::SessionStore;

/// Session store held entirely in process memory.
///
/// Mirrors the Postgres semantics: case-insensitive identity keys,
/// merge-upsert on records, two append-only log streams, and a
/// newest-first merged listing with missing timestamps last.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    records: DashMap<String, AccessRecord>,
    admin_logs: Mutex<Vec<GrantLogEntry>>,
    standard_logs: Mutex<Vec<GrantLogEntry>>,
    allowlist: DashSet<String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put an identity on the privileged allow-list.
    pub fn add_privileged(&self, email: &str) {
        self.allowlist.insert(email.to_lowercase());
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn find_record(&self, email: &str) -> AppResult<Option<AccessRecord>> {
        Ok(self
            .records
            .get(&email.to_lowercase())
            .map(|entry| entry.value().clone()))
    }

    async fn upsert_record(&self, record: &AccessRecord) -> AppResult<()> {
        let key = record.email.to_lowercase();
        if let Some(mut existing) = self.records.get_mut(&key) {
            existing.display_name = record.display_name.clone();
            existing.avatar_url = record.avatar_url.clone();
            existing.last_grant_at = record.last_grant_at;
            existing.grant_date = record.grant_date;
            existing.daily_grant_count = record.daily_grant_count;
            existing.updated_at = chrono::Utc::now();
        } else {
            self.records.insert(key, record.clone());
        }
        Ok(())
    }

    async fn append_grant_log(&self, entry: &GrantLogEntry) -> AppResult<()> {
        let stream = match entry.role {
            GrantRole::Admin => &self.admin_logs,
            GrantRole::Standard => &self.standard_logs,
        };
        stream.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn list_grant_logs(&self) -> AppResult<Vec<GrantLogEntry>> {
        let mut merged: Vec<GrantLogEntry> = self
            .admin_logs
            .lock()
            .unwrap()
            .iter()
            .chain(self.standard_logs.lock().unwrap().iter())
            .cloned()
            .collect();

        merged.sort_by(|a, b| match (a.granted_at, b.granted_at) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        Ok(merged)
    }

    async fn is_privileged(&self, email: &str) -> AppResult<bool> {
        Ok(self.allowlist.contains(&email.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use netgate_entity::identity::Identity;

    fn identity(email: &str) -> Identity {
        Identity::new(email, "Test Guest", None)
    }

    #[tokio::test]
    async fn test_upsert_merges_and_preserves_created_at() {
        let store = MemorySessionStore::new();
        let mut record = AccessRecord::zero_state("Guest@Example.edu");
        store.upsert_record(&record).await.unwrap();

        let created_at = store
            .find_record("guest@example.edu")
            .await
            .unwrap()
            .unwrap()
            .created_at;

        record.daily_grant_count = 2;
        record.last_grant_at = Some(Utc::now());
        store.upsert_record(&record).await.unwrap();

        let merged = store
            .find_record("guest@example.edu")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(merged.daily_grant_count, 2);
        assert_eq!(merged.created_at, created_at);
    }

    #[tokio::test]
    async fn test_merged_listing_sorts_missing_timestamps_last() {
        let store = MemorySessionStore::new();
        let now = Utc::now();

        let older = GrantLogEntry::for_grant(
            &identity("a@example.edu"),
            GrantRole::Standard,
            now - Duration::minutes(30),
        );
        let newer = GrantLogEntry::for_grant(&identity("b@example.edu"), GrantRole::Admin, now);
        let mut dateless =
            GrantLogEntry::for_grant(&identity("c@example.edu"), GrantRole::Standard, now);
        dateless.granted_at = None;

        store.append_grant_log(&older).await.unwrap();
        store.append_grant_log(&dateless).await.unwrap();
        store.append_grant_log(&newer).await.unwrap();

        let listed = store.list_grant_logs().await.unwrap();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].email, "b@example.edu");
        assert_eq!(listed[1].email, "a@example.edu");
        assert_eq!(listed[2].email, "c@example.edu");
    }

    #[tokio::test]
    async fn test_allowlist_absence_is_false() {
        let store = MemorySessionStore::new();
        assert!(!store.is_privileged("nobody@example.edu").await.unwrap());

        store.add_privileged("Admin@Example.edu");
        assert!(store.is_privileged("admin@example.edu").await.unwrap());
    }
}
