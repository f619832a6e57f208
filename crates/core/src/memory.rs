//! In-process [`StandRepository`] used by tests and local tooling.
//!
//! State sits behind a `tokio::sync::RwLock`. Writes can be made to fail on
//! demand to exercise the storage-failure paths of the store service.

use std::collections::BTreeMap;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::models::{Assignment, AssignmentPatch, Entrepreneur, NewEntrepreneur, RotationCounters};
use crate::repository::{SlotOverride, StandRepository};
use crate::types::DbId;

#[derive(Debug, Default)]
struct MemoryState {
    entrepreneurs: BTreeMap<DbId, Entrepreneur>,
    /// Insertion order is preserved.
    assignments: Vec<Assignment>,
    next_id: DbId,
}

impl MemoryState {
    fn set_counters(&mut self, id: DbId, counters: &RotationCounters) {
        if let Some(e) = self.entrepreneurs.get_mut(&id) {
            e.times_assigned = counters.times_assigned;
            e.last_participation_week = counters.last_participation_week.clone();
        }
    }

    fn remove_assignment(&mut self, id: Uuid) -> Option<Assignment> {
        let pos = self.assignments.iter().position(|a| a.id == id)?;
        Some(self.assignments.remove(pos))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryRepository {
    state: RwLock<MemoryState>,
    fail_writes: AtomicBool,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with pre-built entrepreneurs, keeping their ids and counters.
    pub fn with_entrepreneurs(entrepreneurs: Vec<Entrepreneur>) -> Self {
        let next_id = entrepreneurs.iter().map(|e| e.id).max().unwrap_or(0);
        let state = MemoryState {
            entrepreneurs: entrepreneurs.into_iter().map(|e| (e.id, e)).collect(),
            assignments: Vec::new(),
            next_id,
        };
        Self {
            state: RwLock::new(state),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make every subsequent write return a storage error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> CoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CoreError::storage(io::Error::other("write rejected by test repository")));
        }
        Ok(())
    }
}

#[async_trait]
impl StandRepository for InMemoryRepository {
    async fn health_check(&self) -> CoreResult<()> {
        Ok(())
    }

    async fn list_entrepreneurs(&self) -> CoreResult<Vec<Entrepreneur>> {
        Ok(self.state.read().await.entrepreneurs.values().cloned().collect())
    }

    async fn find_entrepreneur(&self, id: DbId) -> CoreResult<Option<Entrepreneur>> {
        Ok(self.state.read().await.entrepreneurs.get(&id).cloned())
    }

    async fn create_entrepreneur(&self, input: &NewEntrepreneur) -> CoreResult<Entrepreneur> {
        self.check_writable()?;
        let mut state = self.state.write().await;
        state.next_id += 1;
        let entrepreneur = Entrepreneur {
            id: state.next_id,
            name: input.name.clone(),
            category: input.category.clone(),
            phone: input.phone.clone(),
            email: input.email.clone(),
            times_assigned: 0,
            last_participation_week: None,
            created_at: chrono::Utc::now(),
        };
        state.entrepreneurs.insert(entrepreneur.id, entrepreneur.clone());
        Ok(entrepreneur)
    }

    async fn update_entrepreneur_counters(
        &self,
        id: DbId,
        counters: &RotationCounters,
    ) -> CoreResult<()> {
        self.check_writable()?;
        self.state.write().await.set_counters(id, counters);
        Ok(())
    }

    async fn list_assignments(&self) -> CoreResult<Vec<Assignment>> {
        Ok(self.state.read().await.assignments.clone())
    }

    async fn insert_assignments(&self, batch: &[Assignment]) -> CoreResult<()> {
        self.check_writable()?;
        let mut state = self.state.write().await;
        if let Some(dup) = batch
            .iter()
            .find(|new| state.assignments.iter().any(|a| a.id == new.id))
        {
            return Err(CoreError::Conflict(format!("Assignment {} already exists", dup.id)));
        }
        state.assignments.extend_from_slice(batch);
        Ok(())
    }

    async fn delete_assignment(&self, id: Uuid) -> CoreResult<Option<Assignment>> {
        self.check_writable()?;
        Ok(self.state.write().await.remove_assignment(id))
    }

    async fn update_assignment(
        &self,
        id: Uuid,
        patch: &AssignmentPatch,
    ) -> CoreResult<Option<Assignment>> {
        self.check_writable()?;
        let mut state = self.state.write().await;
        let Some(assignment) = state.assignments.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        patch.apply_to(assignment);
        Ok(Some(assignment.clone()))
    }

    async fn apply_override(&self, change: &SlotOverride) -> CoreResult<()> {
        self.check_writable()?;
        let mut state = self.state.write().await;
        for id in &change.evicted {
            state.remove_assignment(*id);
        }
        state.assignments.push(change.inserted.clone());
        for update in &change.counter_updates {
            state.set_counters(update.entrepreneur_id, &update.counters);
        }
        Ok(())
    }

    async fn reset_all(&self) -> CoreResult<()> {
        self.check_writable()?;
        let mut state = self.state.write().await;
        state.assignments.clear();
        for e in state.entrepreneurs.values_mut() {
            e.times_assigned = 0;
            e.last_participation_week = None;
        }
        Ok(())
    }
}
