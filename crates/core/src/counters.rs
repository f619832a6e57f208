//! Consistency updater for the denormalized rotation counters.
//!
//! `times_assigned` and `last_participation_week` duplicate information held
//! by the assignment history. Every path that creates or deletes an
//! assignment computes its counter writes here; nothing else in the crate
//! touches the counters.
//!
//! - A committed batch adds its size per entrepreneur (one write each) and
//!   moves `last_participation_week` to the latest week in that group.
//! - A deletion subtracts one, floored at zero, and leaves
//!   `last_participation_week` as it was.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::error::CoreResult;
use crate::models::{Assignment, Entrepreneur, RotationCounters};
use crate::repository::StandRepository;
use crate::types::DbId;
use crate::week::compare_weeks;

/// Target counter values for one entrepreneur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterUpdate {
    pub entrepreneur_id: DbId,
    pub counters: RotationCounters,
}

// ---------------------------------------------------------------------------
// Pure planning
// ---------------------------------------------------------------------------

/// Counters after a deletion.
pub fn plan_decrement(current: &RotationCounters) -> RotationCounters {
    RotationCounters {
        times_assigned: (current.times_assigned - 1).max(0),
        last_participation_week: current.last_participation_week.clone(),
    }
}

/// Counters after adding `weeks.len()` assignments held in `weeks`.
///
/// Returns `current` unchanged when `weeks` is empty.
pub fn plan_increment(current: &RotationCounters, weeks: &[&str]) -> RotationCounters {
    let latest = weeks.iter().copied().max_by(|a, b| compare_weeks(a, b));
    let added = i32::try_from(weeks.len()).unwrap_or(i32::MAX);
    RotationCounters {
        times_assigned: current.times_assigned.saturating_add(added),
        last_participation_week: latest
            .map(str::to_string)
            .or_else(|| current.last_participation_week.clone()),
    }
}

/// Working copy of the registry's counters.
///
/// Operations fold into the copy in call order and return the resulting
/// writes, so an eviction followed by an insert for the same entrepreneur
/// produces two writes whose last one holds the final values.
#[derive(Debug, Clone, Default)]
pub struct CounterLedger {
    counters: HashMap<DbId, RotationCounters>,
}

impl CounterLedger {
    pub fn from_entrepreneurs(entrepreneurs: &[Entrepreneur]) -> Self {
        Self {
            counters: entrepreneurs.iter().map(|e| (e.id, e.counters())).collect(),
        }
    }

    pub fn get(&self, id: DbId) -> Option<&RotationCounters> {
        self.counters.get(&id)
    }

    /// Record one deletion. Unknown entrepreneurs produce no write.
    pub fn decrement(&mut self, id: DbId) -> Option<CounterUpdate> {
        let current = self.counters.get_mut(&id)?;
        *current = plan_decrement(current);
        Some(CounterUpdate {
            entrepreneur_id: id,
            counters: current.clone(),
        })
    }

    /// Record a committed batch: one write per entrepreneur, ordered by id.
    ///
    /// Assignments referencing unknown entrepreneurs are skipped.
    pub fn apply_batch(&mut self, batch: &[Assignment]) -> Vec<CounterUpdate> {
        let mut groups: BTreeMap<DbId, Vec<&str>> = BTreeMap::new();
        for assignment in batch {
            groups
                .entry(assignment.entrepreneur_id)
                .or_default()
                .push(assignment.week.as_str());
        }

        let mut updates = Vec::with_capacity(groups.len());
        for (id, weeks) in groups {
            let Some(current) = self.counters.get_mut(&id) else {
                tracing::warn!(entrepreneur_id = id, "Skipping counters for unknown entrepreneur");
                continue;
            };
            *current = plan_increment(current, &weeks);
            updates.push(CounterUpdate {
                entrepreneur_id: id,
                counters: current.clone(),
            });
        }
        updates
    }
}

// ---------------------------------------------------------------------------
// Applying through the repository
// ---------------------------------------------------------------------------

/// Reads current counters, plans, and writes the result back.
pub struct ConsistencyUpdater<'a> {
    repo: &'a dyn StandRepository,
}

impl<'a> ConsistencyUpdater<'a> {
    pub fn new(repo: &'a dyn StandRepository) -> Self {
        Self { repo }
    }

    /// Fold a committed batch into the registry.
    pub async fn apply_batch(&self, batch: &[Assignment]) -> CoreResult<Vec<CounterUpdate>> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }
        let entrepreneurs = self.repo.list_entrepreneurs().await?;
        let updates = CounterLedger::from_entrepreneurs(&entrepreneurs).apply_batch(batch);
        self.write(&updates).await?;
        Ok(updates)
    }

    /// Mirror the deletion of one assignment owned by `entrepreneur_id`.
    pub async fn apply_decrement(
        &self,
        entrepreneur_id: DbId,
    ) -> CoreResult<Option<CounterUpdate>> {
        let Some(entrepreneur) = self.repo.find_entrepreneur(entrepreneur_id).await? else {
            tracing::warn!(entrepreneur_id, "Deleted assignment references unknown entrepreneur");
            return Ok(None);
        };
        let update = CounterUpdate {
            entrepreneur_id,
            counters: plan_decrement(&entrepreneur.counters()),
        };
        self.write(std::slice::from_ref(&update)).await?;
        Ok(Some(update))
    }

    async fn write(&self, updates: &[CounterUpdate]) -> CoreResult<()> {
        for update in updates {
            self.repo
                .update_entrepreneur_counters(update.entrepreneur_id, &update.counters)
                .await?;
        }
        Ok(())
    }
}
