//! HTTP request handlers.

pub mod admin;
pub mod admission;
pub mod health;
