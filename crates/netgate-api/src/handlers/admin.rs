//! Admin endpoints.

use axum::Json;
use axum::extract::State;
use chrono::Utc;

use crate::dto::GrantEntryResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/admin/grants
///
/// Merged grant history across both log streams, most recent first.
pub async fn list_grants(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<GrantEntryResponse>>> {
    let now = Utc::now();
    let session_minutes = state.config.session.session_minutes;

    let entries = state.store.list_grant_logs().await?;
    let rows = entries
        .into_iter()
        .map(|entry| GrantEntryResponse::from_entry(entry, now, session_minutes))
        .collect();

    Ok(Json(rows))
}
