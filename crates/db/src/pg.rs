//! [`StandRepository`] backed by PostgreSQL.

use async_trait::async_trait;
use standboard_core::error::{CoreError, CoreResult};
use standboard_core::models::{
    Assignment, AssignmentPatch, Entrepreneur, NewEntrepreneur, RotationCounters,
};
use standboard_core::repository::{SlotOverride, StandRepository};
use standboard_core::types::DbId;
use uuid::Uuid;

use crate::repositories::{AssignmentRepo, EntrepreneurRepo};
use crate::DbPool;

/// Map a sqlx error into the core taxonomy.
///
/// Unique violations (SQLSTATE 23505) become `Conflict`; everything else is a
/// storage failure carrying the original error.
fn classify(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            return CoreError::Conflict(format!("Duplicate value violates {constraint}"));
        }
    }
    tracing::error!(error = %err, "Database error");
    CoreError::storage(err)
}

#[derive(Debug, Clone)]
pub struct PgStandRepository {
    pool: DbPool,
}

impl PgStandRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StandRepository for PgStandRepository {
    async fn health_check(&self) -> CoreResult<()> {
        crate::health_check(&self.pool).await.map_err(classify)
    }

    async fn list_entrepreneurs(&self) -> CoreResult<Vec<Entrepreneur>> {
        let rows = EntrepreneurRepo::list(&self.pool).await.map_err(classify)?;
        Ok(rows.into_iter().map(Entrepreneur::from).collect())
    }

    async fn find_entrepreneur(&self, id: DbId) -> CoreResult<Option<Entrepreneur>> {
        let row = EntrepreneurRepo::find_by_id(&self.pool, id)
            .await
            .map_err(classify)?;
        Ok(row.map(Entrepreneur::from))
    }

    async fn create_entrepreneur(&self, input: &NewEntrepreneur) -> CoreResult<Entrepreneur> {
        let row = EntrepreneurRepo::create(&self.pool, input)
            .await
            .map_err(classify)?;
        Ok(row.into())
    }

    async fn update_entrepreneur_counters(
        &self,
        id: DbId,
        counters: &RotationCounters,
    ) -> CoreResult<()> {
        let updated = EntrepreneurRepo::update_counters(&self.pool, id, counters)
            .await
            .map_err(classify)?;
        if !updated {
            tracing::warn!(entrepreneur_id = id, "Counter update matched no entrepreneur");
        }
        Ok(())
    }

    async fn list_assignments(&self) -> CoreResult<Vec<Assignment>> {
        AssignmentRepo::list(&self.pool)
            .await
            .map_err(classify)?
            .into_iter()
            .map(Assignment::try_from)
            .collect()
    }

    async fn insert_assignments(&self, batch: &[Assignment]) -> CoreResult<()> {
        AssignmentRepo::insert_batch(&self.pool, batch)
            .await
            .map_err(classify)
    }

    async fn delete_assignment(&self, id: Uuid) -> CoreResult<Option<Assignment>> {
        AssignmentRepo::delete(&self.pool, id)
            .await
            .map_err(classify)?
            .map(Assignment::try_from)
            .transpose()
    }

    async fn update_assignment(
        &self,
        id: Uuid,
        patch: &AssignmentPatch,
    ) -> CoreResult<Option<Assignment>> {
        AssignmentRepo::update(&self.pool, id, patch)
            .await
            .map_err(classify)?
            .map(Assignment::try_from)
            .transpose()
    }

    async fn apply_override(&self, change: &SlotOverride) -> CoreResult<()> {
        AssignmentRepo::apply_override(&self.pool, change)
            .await
            .map_err(classify)
    }

    async fn reset_all(&self) -> CoreResult<()> {
        AssignmentRepo::reset_all(&self.pool).await.map_err(classify)
    }
}
