//! Session store abstraction.

use async_trait::async_trait;

use netgate_core::result::AppResult;
use netgate_entity::access::AccessRecord;
use netgate_entity::grant::GrantLogEntry;

/// Persistence seam for admission state.
///
/// Backed by Postgres in production and by an in-memory store in tests.
/// All lookups treat the identity key case-insensitively.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Fetch the access record for an identity, if one exists.
    async fn find_record(&self, email: &str) -> AppResult<Option<AccessRecord>>;

    /// Create or merge-update the access record.
    ///
    /// Merge semantics: grant-tracking fields and the identity snapshot are
    /// replaced; creation metadata on an existing record is preserved.
    async fn upsert_record(&self, record: &AccessRecord) -> AppResult<()>;

    /// Append an entry to the grant log stream selected by its role.
    async fn append_grant_log(&self, entry: &GrantLogEntry) -> AppResult<()>;

    /// List entries from both grant log streams, most recent first.
    /// Entries without a timestamp sort last.
    async fn list_grant_logs(&self) -> AppResult<Vec<GrantLogEntry>>;

    /// Whether the identity is on the privileged allow-list.
    ///
    /// Absence from the list is the normal answer `false`, never an error.
    async fn is_privileged(&self, email: &str) -> AppResult<bool>;
}
