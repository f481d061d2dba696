//! The admission endpoint.

use axum::Json;
use axum::extract::State;

use netgate_auth::AdmissionOutcome;
use netgate_core::error::AppError;

use crate::dto::{AdmissionRequest, AdmissionResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// POST /api/admission
///
/// Runs one admission attempt. Grants and rate-limit denials both come
/// back as 200 with a `status` discriminator; only transport failures
/// (invalid token, unreachable issuer) map to error statuses.
pub async fn admit(
    State(state): State<AppState>,
    Json(request): Json<AdmissionRequest>,
) -> ApiResult<Json<AdmissionResponse>> {
    if request.token.trim().is_empty() {
        return Err(AppError::validation("Identity token is required").into());
    }

    let device_address = request.device_address.as_deref().unwrap_or("");
    let outcome = state.engine.admit(&request.token, device_address).await?;

    let session = &state.config.session;
    let response = match outcome {
        AdmissionOutcome::Granted(granted) => AdmissionResponse::granted(
            granted,
            session.session_minutes * 60,
            request.device_address.as_deref().filter(|a| !a.trim().is_empty()),
            request.controller_host.as_deref().filter(|h| !h.trim().is_empty()),
            state.config.controller.portal_port,
        ),
        AdmissionOutcome::Denied {
            reason,
            retry_after,
        } => AdmissionResponse::denied(reason, retry_after),
    };

    Ok(Json(response))
}
