//! Storage collaborator contract.
//!
//! The scheduler and the assignment store only see this trait. Every method
//! reads from or writes to the backing store directly; implementations must
//! not cache, so a read after a failed write reflects what was persisted.

use async_trait::async_trait;
use uuid::Uuid;

use crate::counters::CounterUpdate;
use crate::error::CoreResult;
use crate::models::{Assignment, AssignmentPatch, Entrepreneur, NewEntrepreneur, RotationCounters};
use crate::types::DbId;

/// Eviction plus insertion that must land as one unit.
#[derive(Debug, Clone)]
pub struct SlotOverride {
    /// Conflicting records to delete first.
    pub evicted: Vec<Uuid>,
    /// Record that takes the slot.
    pub inserted: Assignment,
    /// Counter writes in application order: eviction decrements first, then
    /// the increment for `inserted`.
    pub counter_updates: Vec<CounterUpdate>,
}

#[async_trait]
pub trait StandRepository: Send + Sync {
    /// Cheap connectivity probe.
    async fn health_check(&self) -> CoreResult<()>;

    /// All entrepreneurs ordered by id.
    async fn list_entrepreneurs(&self) -> CoreResult<Vec<Entrepreneur>>;

    async fn find_entrepreneur(&self, id: DbId) -> CoreResult<Option<Entrepreneur>>;

    /// Register an entrepreneur. The category must already be normalized.
    async fn create_entrepreneur(&self, input: &NewEntrepreneur) -> CoreResult<Entrepreneur>;

    /// Overwrite an entrepreneur's rotation counters.
    async fn update_entrepreneur_counters(
        &self,
        id: DbId,
        counters: &RotationCounters,
    ) -> CoreResult<()>;

    /// Every assignment across all weeks.
    async fn list_assignments(&self) -> CoreResult<Vec<Assignment>>;

    /// Insert a batch of assignments.
    async fn insert_assignments(&self, batch: &[Assignment]) -> CoreResult<()>;

    /// Delete by id, returning the removed record if it existed.
    async fn delete_assignment(&self, id: Uuid) -> CoreResult<Option<Assignment>>;

    /// Patch follow-up fields. Returns `None` if the id is unknown.
    async fn update_assignment(
        &self,
        id: Uuid,
        patch: &AssignmentPatch,
    ) -> CoreResult<Option<Assignment>>;

    /// Apply an eviction-then-insert atomically.
    async fn apply_override(&self, change: &SlotOverride) -> CoreResult<()>;

    /// Delete every assignment and reset every entrepreneur's counters.
    async fn reset_all(&self) -> CoreResult<()>;
}
