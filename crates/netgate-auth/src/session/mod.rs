//! Session persistence and the client-side countdown timer.

pub mod memory;
pub mod postgres;
pub mod store;
pub mod timer;

pub use memory::MemorySessionStore;
pub use postgres::PgSessionStore;
pub use store::SessionStore;
pub use timer::{SessionTimer, TimerState};
