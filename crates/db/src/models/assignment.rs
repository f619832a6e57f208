//! Assignment row model.

use serde::Serialize;
use sqlx::FromRow;
use standboard_core::error::CoreError;
use standboard_core::models::Assignment;
use standboard_core::slot::Shift;
use standboard_core::types::{DbId, StandId, Timestamp};
use uuid::Uuid;

/// A row from the `assignments` table. `block` and `shift` are stored as
/// their wire names; a NULL shift is a legacy full-day record.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssignmentRow {
    pub id: Uuid,
    pub entrepreneur_id: DbId,
    pub stand_id: StandId,
    pub week: String,
    pub block: String,
    pub shift: Option<String>,
    pub status: String,
    pub attended: Option<bool>,
    pub comments: Option<String>,
    pub created_at: Timestamp,
}

impl TryFrom<AssignmentRow> for Assignment {
    type Error = CoreError;

    fn try_from(row: AssignmentRow) -> Result<Self, Self::Error> {
        let block = row.block.parse().map_err(|_| {
            CoreError::Internal(format!("assignment {} has block {:?}", row.id, row.block))
        })?;
        let shift = Shift::from_stored(row.shift.as_deref()).map_err(|_| {
            CoreError::Internal(format!("assignment {} has shift {:?}", row.id, row.shift))
        })?;
        Ok(Self {
            id: row.id,
            entrepreneur_id: row.entrepreneur_id,
            stand_id: row.stand_id,
            week: row.week,
            block,
            shift,
            status: row.status,
            attended: row.attended,
            comments: row.comments,
            created_at: row.created_at,
        })
    }
}
