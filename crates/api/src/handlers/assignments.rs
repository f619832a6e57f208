//! Handlers for listing, placing, updating and deleting assignments.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use standboard_core::error::CoreError;
use standboard_core::models::{Assignment, AssignmentPatch, STATUS_INVITED};
use standboard_core::slot::{Block, Shift};
use standboard_core::types::{DbId, StandId};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for listing assignments.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Restrict to one week; `W` and `S` prefixes match each other.
    pub week: Option<String>,
}

/// Request body for a manual placement.
#[derive(Debug, Deserialize)]
pub struct ManualAssignmentRequest {
    pub entrepreneur_id: DbId,
    pub stand_id: StandId,
    pub week: String,
    pub block: Block,
    pub shift: Shift,
    /// Defaults to `invited`.
    pub status: Option<String>,
}

/// Result of a manual placement: the new record and whatever it displaced.
#[derive(Debug, Serialize)]
pub struct ManualAssignmentResponse {
    pub assignment: Assignment,
    pub evicted: Vec<Assignment>,
}

// ---------------------------------------------------------------------------
// GET /assignments
// ---------------------------------------------------------------------------

pub async fn list_assignments(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let items = state.store.list_assignments(params.week.as_deref()).await?;
    tracing::debug!(count = items.len(), week = ?params.week, "Listed assignments");
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// POST /assignments
// ---------------------------------------------------------------------------

/// Place an entrepreneur in a slot, evicting conflicting records.
pub async fn set_manual_assignment(
    State(state): State<AppState>,
    Json(input): Json<ManualAssignmentRequest>,
) -> AppResult<impl IntoResponse> {
    if state.store.grid().stand(input.stand_id).is_none() {
        return Err(AppError::BadRequest(format!(
            "Unknown stand {}",
            input.stand_id
        )));
    }
    if input.week.trim().is_empty() {
        return Err(AppError::BadRequest("week must not be empty".into()));
    }
    state
        .store
        .repository()
        .find_entrepreneur(input.entrepreneur_id)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "Entrepreneur",
            id: input.entrepreneur_id.to_string(),
        })?;

    let status = input.status.as_deref().unwrap_or(STATUS_INVITED);
    let assignment = Assignment::new(
        input.entrepreneur_id,
        input.stand_id,
        input.week.trim(),
        input.block,
        input.shift,
        status,
    );
    let evicted = state.store.set_manual_assignment(assignment.clone()).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ManualAssignmentResponse {
                assignment,
                evicted,
            },
        }),
    ))
}

// ---------------------------------------------------------------------------
// PATCH /assignments/{id}
// ---------------------------------------------------------------------------

/// Update follow-up fields (status, attendance, comments).
pub async fn update_assignment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<AssignmentPatch>,
) -> AppResult<impl IntoResponse> {
    let updated = state
        .store
        .update_assignment(id, &patch)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "Assignment",
            id: id.to_string(),
        })?;
    tracing::info!(assignment_id = %id, status = %updated.status, "Assignment updated");
    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// DELETE /assignments/{id}
// ---------------------------------------------------------------------------

/// Delete one assignment. Unknown ids are a no-op.
pub async fn delete_assignment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    state.store.delete_assignment(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
