//! Repository for the `assignments` table.
//!
//! Multi-statement writes (batch insert, override, reset) run inside a
//! single transaction.

use sqlx::{PgConnection, PgPool};
use standboard_core::models::{Assignment, AssignmentPatch};
use standboard_core::repository::SlotOverride;
use uuid::Uuid;

use crate::models::assignment::AssignmentRow;
use crate::repositories::EntrepreneurRepo;

const COLUMNS: &str = "id, entrepreneur_id, stand_id, week, block, shift, status, \
    attended, comments, created_at";

/// Provides CRUD operations for assignments.
pub struct AssignmentRepo;

impl AssignmentRepo {
    /// List every assignment, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<AssignmentRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assignments ORDER BY created_at, id");
        sqlx::query_as::<_, AssignmentRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Insert a batch in one transaction.
    pub async fn insert_batch(pool: &PgPool, batch: &[Assignment]) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for assignment in batch {
            insert_one(&mut *tx, assignment).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Delete by id, returning the removed row.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<Option<AssignmentRow>, sqlx::Error> {
        let query = format!("DELETE FROM assignments WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, AssignmentRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Patch follow-up fields. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        patch: &AssignmentPatch,
    ) -> Result<Option<AssignmentRow>, sqlx::Error> {
        let query = format!(
            "UPDATE assignments SET
                status = COALESCE($2, status),
                attended = COALESCE($3, attended),
                comments = COALESCE($4, comments)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AssignmentRow>(&query)
            .bind(id)
            .bind(&patch.status)
            .bind(patch.attended)
            .bind(&patch.comments)
            .fetch_optional(pool)
            .await
    }

    /// Evict, insert and write counters in one transaction.
    pub async fn apply_override(
        pool: &PgPool,
        change: &SlotOverride,
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        for id in &change.evicted {
            sqlx::query("DELETE FROM assignments WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        insert_one(&mut *tx, &change.inserted).await?;

        for update in &change.counter_updates {
            EntrepreneurRepo::update_counters(&mut *tx, update.entrepreneur_id, &update.counters)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Delete every assignment and zero every entrepreneur's counters.
    pub async fn reset_all(pool: &PgPool) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM assignments")
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE entrepreneurs
             SET times_assigned = 0, last_participation_week = NULL, updated_at = now()",
        )
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn insert_one(
    conn: &mut PgConnection,
    assignment: &Assignment,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO assignments
            (id, entrepreneur_id, stand_id, week, block, shift, status, attended,
             comments, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
    )
    .bind(assignment.id)
    .bind(assignment.entrepreneur_id)
    .bind(assignment.stand_id)
    .bind(&assignment.week)
    .bind(assignment.block.as_str())
    .bind(assignment.shift.as_str())
    .bind(&assignment.status)
    .bind(assignment.attended)
    .bind(&assignment.comments)
    .bind(assignment.created_at)
    .execute(conn)
    .await?;
    Ok(())
}
