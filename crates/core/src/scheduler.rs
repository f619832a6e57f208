//! Weekly scheduler: walks the slot grid and builds one batch of invitations.
//!
//! Generation is pure. It reads a snapshot of the registry and the history
//! and returns the batch; nothing is persisted until the caller commits it
//! through [`crate::store::AssignmentStore`].

use serde::Serialize;

use crate::models::{Assignment, Entrepreneur};
use crate::ranking::{CandidateRanker, PassState};
use crate::slot::{Block, GridConfig, Shift, SlotKey};
use crate::types::StandId;
use crate::week::same_week;

/// A generated slot nobody could fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnfilledSlot {
    pub stand_id: StandId,
    pub block: Block,
    pub shift: Shift,
}

/// Result of one generation pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationOutcome {
    pub week: String,
    /// New `invited` assignments, in traversal order.
    pub assignments: Vec<Assignment>,
    /// Slots left empty because no candidate survived the filters.
    pub unfilled: Vec<UnfilledSlot>,
    /// Slots skipped because the week already has a conflicting record.
    pub already_occupied: usize,
}

/// Build the assignment batch for `week`.
///
/// Traversal is block, then shift (morning, afternoon), then stand in grid
/// order. Existing records for the same week make their slots unavailable
/// and count their entrepreneurs as already used this week.
pub fn generate_week(
    grid: &GridConfig,
    entrepreneurs: &[Entrepreneur],
    history: &[Assignment],
    week: &str,
) -> GenerationOutcome {
    let existing: Vec<SlotKey> = history
        .iter()
        .filter(|a| same_week(&a.week, week))
        .map(Assignment::slot_key)
        .collect();

    let ranker = CandidateRanker::new(entrepreneurs, history, week);
    let mut pass = PassState::default();
    pass.used_this_week.extend(
        history
            .iter()
            .filter(|a| same_week(&a.week, week))
            .map(|a| a.entrepreneur_id),
    );

    let mut outcome = GenerationOutcome {
        week: week.to_string(),
        ..Default::default()
    };
    let mut current_shift: Option<(Block, Shift)> = None;

    for (block, shift, stand) in grid.generation_order() {
        if current_shift != Some((block, shift)) {
            pass.start_shift();
            current_shift = Some((block, shift));
        }

        let key = SlotKey {
            stand_id: stand.id,
            week: week.to_string(),
            block,
            shift,
        };
        if existing.iter().any(|held| held.conflicts_with(&key)) {
            outcome.already_occupied += 1;
            continue;
        }

        match ranker.select(stand, &pass) {
            Some(chosen) => {
                pass.record(chosen);
                outcome
                    .assignments
                    .push(Assignment::invited(chosen.id, stand.id, week, block, shift));
            }
            None => outcome.unfilled.push(UnfilledSlot {
                stand_id: stand.id,
                block,
                shift,
            }),
        }
    }

    tracing::debug!(
        week,
        assigned = outcome.assignments.len(),
        unfilled = outcome.unfilled.len(),
        already_occupied = outcome.already_occupied,
        "Generated weekly batch",
    );

    outcome
}
