//! Assignment store: the caller-facing operations over a [`StandRepository`].
//!
//! Every operation reads fresh state from the repository, computes its
//! writes, and applies them. Counter writes always go through
//! [`crate::counters`]. A storage failure is logged and returned; writes
//! already issued by that operation are not undone, so callers should reload
//! before trusting further reads.

use std::sync::Arc;

use uuid::Uuid;

use crate::category::normalize_category;
use crate::counters::{ConsistencyUpdater, CounterLedger};
use crate::error::{CoreError, CoreResult};
use crate::models::{
    normalize_status, Assignment, AssignmentPatch, Entrepreneur, NewEntrepreneur,
};
use crate::repository::{SlotOverride, StandRepository};
use crate::scheduler::{generate_week, GenerationOutcome};
use crate::slot::{Block, GridConfig, Shift, SlotKey};
use crate::types::StandId;
use crate::week::same_week;

/// Log a storage failure with the operation name before propagating it.
fn log_failure<T>(result: CoreResult<T>, operation: &'static str) -> CoreResult<T> {
    if let Err(e) = &result {
        tracing::error!(
            operation,
            error = %e,
            "Storage operation failed; reload state before further reads",
        );
    }
    result
}

#[derive(Clone)]
pub struct AssignmentStore {
    repo: Arc<dyn StandRepository>,
    grid: GridConfig,
}

impl AssignmentStore {
    pub fn new(repo: Arc<dyn StandRepository>, grid: GridConfig) -> Self {
        Self { repo, grid }
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    pub fn repository(&self) -> &dyn StandRepository {
        self.repo.as_ref()
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub async fn list_entrepreneurs(&self) -> CoreResult<Vec<Entrepreneur>> {
        log_failure(self.repo.list_entrepreneurs().await, "list_entrepreneurs")
    }

    /// Assignments, optionally restricted to one week (either prefix).
    pub async fn list_assignments(&self, week: Option<&str>) -> CoreResult<Vec<Assignment>> {
        let all = log_failure(self.repo.list_assignments().await, "list_assignments")?;
        Ok(match week {
            Some(week) => all.into_iter().filter(|a| same_week(&a.week, week)).collect(),
            None => all,
        })
    }

    // -----------------------------------------------------------------------
    // Registration / follow-up
    // -----------------------------------------------------------------------

    /// Register an entrepreneur with a normalized category.
    pub async fn register_entrepreneur(&self, input: NewEntrepreneur) -> CoreResult<Entrepreneur> {
        let input = NewEntrepreneur {
            name: input.name.trim().to_string(),
            category: normalize_category(&input.category),
            ..input
        };
        if input.name.is_empty() {
            return Err(CoreError::Validation("Entrepreneur name must not be blank".into()));
        }
        let created = log_failure(
            self.repo.create_entrepreneur(&input).await,
            "create_entrepreneur",
        )?;
        tracing::info!(
            entrepreneur_id = created.id,
            category = %created.category,
            "Entrepreneur registered",
        );
        Ok(created)
    }

    /// Update status, attendance or comments. Counters are not affected.
    pub async fn update_assignment(
        &self,
        id: Uuid,
        patch: &AssignmentPatch,
    ) -> CoreResult<Option<Assignment>> {
        let patch = AssignmentPatch {
            status: patch.status.as_deref().map(normalize_status),
            ..patch.clone()
        };
        log_failure(
            self.repo.update_assignment(id, &patch).await,
            "update_assignment",
        )
    }

    // -----------------------------------------------------------------------
    // Generation
    // -----------------------------------------------------------------------

    /// Run the scheduler for `week` against live state without writing.
    pub async fn preview_assignments(&self, week: &str) -> CoreResult<GenerationOutcome> {
        let entrepreneurs = self.list_entrepreneurs().await?;
        let history = self.list_assignments(None).await?;
        Ok(generate_week(&self.grid, &entrepreneurs, &history, week))
    }

    /// Generate and commit the batch for `week`.
    pub async fn generate_assignments(&self, week: &str) -> CoreResult<GenerationOutcome> {
        let outcome = self.preview_assignments(week).await?;
        self.save_assignments_batch(&outcome.assignments).await?;
        tracing::info!(
            week,
            assigned = outcome.assignments.len(),
            unfilled = outcome.unfilled.len(),
            "Assignments generated",
        );
        Ok(outcome)
    }

    /// Insert every record, then apply one counter write per entrepreneur.
    pub async fn save_assignments_batch(&self, batch: &[Assignment]) -> CoreResult<()> {
        if batch.is_empty() {
            return Ok(());
        }
        log_failure(self.repo.insert_assignments(batch).await, "insert_assignments")?;
        log_failure(
            ConsistencyUpdater::new(self.repository()).apply_batch(batch).await,
            "apply_batch",
        )?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Manual overrides
    // -----------------------------------------------------------------------

    /// Place `assignment` in its slot, evicting every conflicting record on
    /// the same `(stand, week, block)` first.
    ///
    /// A stored record with the same id is evicted too, wherever it sits, so
    /// re-submitting an assignment replaces it. Returns the evicted records.
    pub async fn set_manual_assignment(
        &self,
        mut assignment: Assignment,
    ) -> CoreResult<Vec<Assignment>> {
        assignment.status = normalize_status(&assignment.status);
        let key = assignment.slot_key();
        let evicted: Vec<Assignment> = self
            .list_assignments(None)
            .await?
            .into_iter()
            .filter(|a| a.id == assignment.id || a.slot_key().conflicts_with(&key))
            .collect();

        let entrepreneurs = self.list_entrepreneurs().await?;
        let mut ledger = CounterLedger::from_entrepreneurs(&entrepreneurs);
        let mut counter_updates: Vec<_> = evicted
            .iter()
            .filter_map(|a| ledger.decrement(a.entrepreneur_id))
            .collect();
        counter_updates.extend(ledger.apply_batch(std::slice::from_ref(&assignment)));

        let change = SlotOverride {
            evicted: evicted.iter().map(|a| a.id).collect(),
            inserted: assignment,
            counter_updates,
        };
        log_failure(self.repo.apply_override(&change).await, "apply_override")?;

        tracing::info!(
            assignment_id = %change.inserted.id,
            entrepreneur_id = change.inserted.entrepreneur_id,
            stand_id = change.inserted.stand_id,
            week = %change.inserted.week,
            block = %change.inserted.block,
            shift = %change.inserted.shift,
            evicted = evicted.len(),
            "Manual assignment set",
        );
        Ok(evicted)
    }

    /// Delete the record holding exactly this slot. Returns `false` if none.
    pub async fn remove_assignment(
        &self,
        stand_id: StandId,
        week: &str,
        shift: Shift,
        block: Block,
    ) -> CoreResult<bool> {
        let key = SlotKey {
            stand_id,
            week: week.to_string(),
            block,
            shift,
        };
        let found = self
            .list_assignments(Some(week))
            .await?
            .into_iter()
            .find(|a| a.slot_key().matches(&key));
        match found {
            Some(a) => self.delete_assignment(a.id).await,
            None => Ok(false),
        }
    }

    /// Delete by id and decrement the owner's counter. Returns `false` if the
    /// id is unknown.
    pub async fn delete_assignment(&self, id: Uuid) -> CoreResult<bool> {
        let Some(removed) = log_failure(self.repo.delete_assignment(id).await, "delete_assignment")?
        else {
            return Ok(false);
        };
        log_failure(
            ConsistencyUpdater::new(self.repository())
                .apply_decrement(removed.entrepreneur_id)
                .await,
            "apply_decrement",
        )?;
        tracing::info!(
            assignment_id = %id,
            entrepreneur_id = removed.entrepreneur_id,
            "Assignment deleted",
        );
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Bulk clearing
    // -----------------------------------------------------------------------

    /// Delete every record of one block in `week`, one at a time.
    pub async fn clear_block_assignments(&self, week: &str, block: Block) -> CoreResult<usize> {
        let targets: Vec<Uuid> = self
            .list_assignments(Some(week))
            .await?
            .into_iter()
            .filter(|a| a.block == block)
            .map(|a| a.id)
            .collect();
        self.delete_each(&targets).await
    }

    /// Delete every record of `week`, one at a time.
    pub async fn clear_week_assignments(&self, week: &str) -> CoreResult<usize> {
        let targets: Vec<Uuid> = self
            .list_assignments(Some(week))
            .await?
            .into_iter()
            .map(|a| a.id)
            .collect();
        self.delete_each(&targets).await
    }

    /// Delete every assignment and reset every counter. Destructive; callers
    /// must have confirmed the intent.
    pub async fn clear_all_data(&self) -> CoreResult<()> {
        log_failure(self.repo.reset_all().await, "reset_all")?;
        tracing::warn!("All assignments deleted and rotation counters reset");
        Ok(())
    }

    async fn delete_each(&self, ids: &[Uuid]) -> CoreResult<usize> {
        let mut deleted = 0;
        for id in ids {
            if self.delete_assignment(*id).await? {
                deleted += 1;
            }
        }
        Ok(deleted)
    }
}
