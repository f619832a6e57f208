//! Handler for listing the configured stand grid.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::response::DataResponse;
use crate::state::AppState;

/// List the stands in grid order.
pub async fn list_stands(State(state): State<AppState>) -> impl IntoResponse {
    Json(DataResponse {
        data: state.store.grid().stands.clone(),
    })
}
