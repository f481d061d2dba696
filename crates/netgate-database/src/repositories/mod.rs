//! Repository implementations, one per collection.

pub mod access_record;
pub mod allowlist;
pub mod grant_log;

pub use access_record::AccessRecordRepository;
pub use allowlist::AllowlistRepository;
pub use grant_log::GrantLogRepository;
