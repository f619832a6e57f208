//! Week-scoped operations: generation, preview and clearing.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use standboard_core::slot::{Block, Shift};
use standboard_core::types::StandId;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Count of records removed by a clearing operation.
#[derive(Debug, Serialize)]
pub struct ClearedResponse {
    pub deleted: usize,
}

fn parse_block(raw: &str) -> AppResult<Block> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Unknown block '{raw}'")))
}

fn parse_shift(raw: &str) -> AppResult<Shift> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Unknown shift '{raw}'")))
}

// ---------------------------------------------------------------------------
// POST /weeks/{week}/generate
// ---------------------------------------------------------------------------

/// Generate and commit invitations for every free slot of the week.
pub async fn generate(
    State(state): State<AppState>,
    Path(week): Path<String>,
) -> AppResult<impl IntoResponse> {
    let outcome = state.store.generate_assignments(&week).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: outcome })))
}

// ---------------------------------------------------------------------------
// POST /weeks/{week}/preview
// ---------------------------------------------------------------------------

/// Run generation without committing anything.
pub async fn preview(
    State(state): State<AppState>,
    Path(week): Path<String>,
) -> AppResult<impl IntoResponse> {
    let outcome = state.store.preview_assignments(&week).await?;
    Ok(Json(DataResponse { data: outcome }))
}

// ---------------------------------------------------------------------------
// DELETE /weeks/{week}/assignments
// ---------------------------------------------------------------------------

pub async fn clear_week(
    State(state): State<AppState>,
    Path(week): Path<String>,
) -> AppResult<impl IntoResponse> {
    let deleted = state.store.clear_week_assignments(&week).await?;
    tracing::info!(week = %week, deleted, "Week cleared");
    Ok(Json(DataResponse {
        data: ClearedResponse { deleted },
    }))
}

// ---------------------------------------------------------------------------
// DELETE /weeks/{week}/blocks/{block}/assignments
// ---------------------------------------------------------------------------

pub async fn clear_block(
    State(state): State<AppState>,
    Path((week, block)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let block = parse_block(&block)?;
    let deleted = state.store.clear_block_assignments(&week, block).await?;
    tracing::info!(week = %week, block = %block, deleted, "Block cleared");
    Ok(Json(DataResponse {
        data: ClearedResponse { deleted },
    }))
}

// ---------------------------------------------------------------------------
// DELETE /weeks/{week}/blocks/{block}/stands/{stand_id}/shifts/{shift}
// ---------------------------------------------------------------------------

/// Remove the record holding exactly this slot, if any.
pub async fn remove_slot(
    State(state): State<AppState>,
    Path((week, block, stand_id, shift)): Path<(String, String, StandId, String)>,
) -> AppResult<impl IntoResponse> {
    let block = parse_block(&block)?;
    let shift = parse_shift(&shift)?;
    let removed = state
        .store
        .remove_assignment(stand_id, &week, shift, block)
        .await?;
    Ok(Json(DataResponse {
        data: ClearedResponse {
            deleted: usize::from(removed),
        },
    }))
}
