//! Shared application state threaded through all handlers.

use std::sync::Arc;

use netgate_auth::{AdmissionEngine, SessionStore};
use netgate_core::config::AppConfig;

/// Application state available to every handler via Axum's `State`.
///
/// Deliberately free of any database handle: handlers only see the
/// engine and the store seam, so the whole router runs against the
/// in-memory store in tests.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub engine: Arc<AdmissionEngine>,
    pub store: Arc<dyn SessionStore>,
}

impl AppState {
    pub fn new(
        config: Arc<AppConfig>,
        engine: Arc<AdmissionEngine>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            config,
            engine,
            store,
        }
    }
}
