//! Handlers for the entrepreneur registry.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use standboard_db::models::entrepreneur::CreateEntrepreneur;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /entrepreneurs
// ---------------------------------------------------------------------------

/// List every registered entrepreneur with their rotation counters.
pub async fn list_entrepreneurs(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = state.store.list_entrepreneurs().await?;
    tracing::debug!(count = items.len(), "Listed entrepreneurs");
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// POST /entrepreneurs
// ---------------------------------------------------------------------------

/// Register an entrepreneur. The category is normalized before storage.
pub async fn create_entrepreneur(
    State(state): State<AppState>,
    Json(input): Json<CreateEntrepreneur>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let created = state.store.register_entrepreneur(input.into()).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}
