//! Repository for the `entrepreneurs` table.

use sqlx::{PgExecutor, PgPool};
use standboard_core::models::{NewEntrepreneur, RotationCounters};
use standboard_core::types::DbId;

use crate::models::entrepreneur::EntrepreneurRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, category, phone, email, times_assigned, \
    last_participation_week, created_at, updated_at";

/// Provides CRUD operations for entrepreneurs.
pub struct EntrepreneurRepo;

impl EntrepreneurRepo {
    /// Insert a new entrepreneur with zeroed counters.
    pub async fn create(
        pool: &PgPool,
        input: &NewEntrepreneur,
    ) -> Result<EntrepreneurRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO entrepreneurs (name, category, phone, email)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EntrepreneurRow>(&query)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.phone)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<EntrepreneurRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM entrepreneurs WHERE id = $1");
        sqlx::query_as::<_, EntrepreneurRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all entrepreneurs in registration order.
    pub async fn list(pool: &PgPool) -> Result<Vec<EntrepreneurRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM entrepreneurs ORDER BY id");
        sqlx::query_as::<_, EntrepreneurRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Overwrite the rotation counters. Returns `false` if the id is unknown.
    ///
    /// Accepts the pool or an open transaction.
    pub async fn update_counters<'e, E>(
        executor: E,
        id: DbId,
        counters: &RotationCounters,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            "UPDATE entrepreneurs
             SET times_assigned = $2, last_participation_week = $3, updated_at = now()
             WHERE id = $1",
        )
        .bind(id)
        .bind(counters.times_assigned)
        .bind(&counters.last_participation_week)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
