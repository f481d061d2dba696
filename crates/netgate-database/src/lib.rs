//! # netgate-database
//!
//! PostgreSQL persistence for NetGate: connection pool management,
//! migrations, and one repository per collection.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
