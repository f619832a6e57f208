//! Destructive administrative operations.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Body required by `POST /admin/reset`.
#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    #[serde(default)]
    pub confirm: bool,
}

/// Delete every assignment and zero every counter.
pub async fn reset_all(
    State(state): State<AppState>,
    Json(input): Json<ResetRequest>,
) -> AppResult<impl IntoResponse> {
    if !input.confirm {
        return Err(AppError::BadRequest(
            "Reset requires {\"confirm\": true}".into(),
        ));
    }
    state.store.clear_all_data().await?;
    Ok(StatusCode::NO_CONTENT)
}
