//! Entrepreneur row model and registration DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use standboard_core::models::{Entrepreneur, NewEntrepreneur};
use standboard_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `entrepreneurs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EntrepreneurRow {
    pub id: DbId,
    pub name: String,
    pub category: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub times_assigned: i32,
    pub last_participation_week: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<EntrepreneurRow> for Entrepreneur {
    fn from(row: EntrepreneurRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            category: row.category,
            phone: row.phone,
            email: row.email,
            times_assigned: row.times_assigned,
            last_participation_week: row.last_participation_week,
            created_at: row.created_at,
        }
    }
}

/// DTO for registering an entrepreneur.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEntrepreneur {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 120, message = "category must be 1-120 characters"))]
    pub category: String,
    #[validate(length(max = 40))]
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

impl From<CreateEntrepreneur> for NewEntrepreneur {
    fn from(input: CreateEntrepreneur) -> Self {
        Self {
            name: input.name,
            category: input.category,
            phone: input.phone,
            email: input.email,
        }
    }
}
