//! Candidate filtering and ranking for a single slot.
//!
//! Filters (a candidate is dropped if any holds):
//! 1. The stand is category-restricted and the category differs.
//! 2. The candidate was already placed earlier in the same weekly pass.
//! 3. The candidate's last participation is 1..=3 weeks before the target.
//! 4. The candidate's two most recent assignments were both rejected.
//!
//! Survivors are ranked ascending by:
//! 1. category not yet used in the current shift pass,
//! 2. never participated,
//! 3. fewer participations,
//! 4. lower id.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::category::{normalize_category, stand_accepts};
use crate::models::{Assignment, Entrepreneur};
use crate::slot::Stand;
use crate::types::DbId;
use crate::week::{compare_weeks, within_cooldown};

/// How many trailing rejections exclude an entrepreneur.
pub const REJECTION_STREAK_LIMIT: usize = 2;

// ---------------------------------------------------------------------------
// Pass state
// ---------------------------------------------------------------------------

/// Selections made so far in one `generate` call.
///
/// `used_this_week` lives for the whole week; `categories_in_shift` is
/// cleared at the start of every `(block, shift)` pass.
#[derive(Debug, Default, Clone)]
pub struct PassState {
    pub used_this_week: HashSet<DbId>,
    pub categories_in_shift: HashSet<String>,
}

impl PassState {
    pub fn start_shift(&mut self) {
        self.categories_in_shift.clear();
    }

    pub fn record(&mut self, entrepreneur: &Entrepreneur) {
        self.used_this_week.insert(entrepreneur.id);
        self.categories_in_shift
            .insert(normalize_category(&entrepreneur.category));
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Whether the entrepreneur's last participation is inside the cooldown
/// window before `week`.
pub fn is_on_cooldown(entrepreneur: &Entrepreneur, week: &str) -> bool {
    entrepreneur
        .last_participation_week
        .as_deref()
        .is_some_and(|last| within_cooldown(last, week))
}

/// Ids of entrepreneurs whose latest [`REJECTION_STREAK_LIMIT`] assignments,
/// ordered by week descending across the whole history, are all rejected.
///
/// The history is not scoped to weeks before the generation target.
pub fn rejection_streaks(history: &[Assignment]) -> HashSet<DbId> {
    let mut by_entrepreneur: HashMap<DbId, Vec<&Assignment>> = HashMap::new();
    for assignment in history {
        by_entrepreneur
            .entry(assignment.entrepreneur_id)
            .or_default()
            .push(assignment);
    }

    by_entrepreneur
        .into_iter()
        .filter_map(|(id, mut records)| {
            if records.len() < REJECTION_STREAK_LIMIT {
                return None;
            }
            // Stable sort keeps insertion order for records of the same week.
            records.sort_by(|a, b| compare_weeks(&b.week, &a.week));
            records
                .iter()
                .take(REJECTION_STREAK_LIMIT)
                .all(|a| a.is_rejected())
                .then_some(id)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Ranker
// ---------------------------------------------------------------------------

/// Sort key for a surviving candidate. Smaller is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RankKey {
    pub category_already_used: bool,
    pub has_participated: bool,
    pub times_assigned: i32,
    pub id: DbId,
}

impl RankKey {
    pub fn for_candidate(entrepreneur: &Entrepreneur, pass: &PassState) -> Self {
        Self {
            category_already_used: pass
                .categories_in_shift
                .contains(&normalize_category(&entrepreneur.category)),
            has_participated: entrepreneur.times_assigned > 0,
            times_assigned: entrepreneur.times_assigned,
            id: entrepreneur.id,
        }
    }
}

/// Picks the best candidate for each slot of one target week.
///
/// Everything that depends only on the registry and history (cooldown,
/// rejection streaks) is computed once up front; per-slot calls only apply
/// the pass-dependent filters and the ranking.
pub struct CandidateRanker<'a> {
    entrepreneurs: &'a [Entrepreneur],
    excluded: HashSet<DbId>,
}

impl<'a> CandidateRanker<'a> {
    pub fn new(entrepreneurs: &'a [Entrepreneur], history: &[Assignment], week: &str) -> Self {
        let mut excluded = rejection_streaks(history);
        excluded.extend(
            entrepreneurs
                .iter()
                .filter(|e| is_on_cooldown(e, week))
                .map(|e| e.id),
        );
        Self {
            entrepreneurs,
            excluded,
        }
    }

    /// Whether the entrepreneur passes every filter for `stand` given the
    /// current pass.
    pub fn is_eligible(
        &self,
        entrepreneur: &Entrepreneur,
        stand: &Stand,
        pass: &PassState,
    ) -> bool {
        stand_accepts(&stand.category, &entrepreneur.category)
            && !pass.used_this_week.contains(&entrepreneur.id)
            && !self.excluded.contains(&entrepreneur.id)
    }

    /// The best candidate for `stand`, or `None` if nobody is eligible.
    pub fn select(&self, stand: &Stand, pass: &PassState) -> Option<&'a Entrepreneur> {
        self.entrepreneurs
            .iter()
            .filter(|e| self.is_eligible(e, stand, pass))
            .min_by(|a, b| compare_rank(a, b, pass))
    }
}

fn compare_rank(a: &Entrepreneur, b: &Entrepreneur, pass: &PassState) -> Ordering {
    RankKey::for_candidate(a, pass).cmp(&RankKey::for_candidate(b, pass))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::WILDCARD_CATEGORY;
    use crate::models::{STATUS_CONFIRMED, STATUS_REJECTED};
    use crate::slot::{Block, Shift};

    fn entrepreneur(id: DbId, category: &str, times: i32, last: Option<&str>) -> Entrepreneur {
        Entrepreneur {
            id,
            name: format!("E{id}"),
            category: normalize_category(category),
            phone: None,
            email: None,
            times_assigned: times,
            last_participation_week: last.map(str::to_string),
            created_at: chrono::Utc::now(),
        }
    }

    fn record(entrepreneur_id: DbId, week: &str, status: &str) -> Assignment {
        Assignment::new(entrepreneur_id, 1, week, Block::MonTue, Shift::Morning, status)
    }

    fn stand(category: &str) -> Stand {
        Stand {
            id: 1,
            name: "Stand 1".into(),
            category: category.into(),
        }
    }

    // -----------------------------------------------------------------------
    // Filters
    // -----------------------------------------------------------------------

    #[test]
    fn cooldown_excludes_recent_participation() {
        let c = entrepreneur(1, "A", 1, Some("2025-W08"));
        assert!(is_on_cooldown(&c, "2025-W10"));
        assert!(!is_on_cooldown(&c, "2025-W12"));
        assert!(!is_on_cooldown(&entrepreneur(2, "A", 0, None), "2025-W10"));
    }

    #[test]
    fn two_latest_rejections_exclude() {
        let history = vec![
            record(1, "2025-W01", STATUS_CONFIRMED),
            record(1, "2025-W05", STATUS_REJECTED),
            record(1, "2025-W03", STATUS_REJECTED),
        ];
        assert!(rejection_streaks(&history).contains(&1));
    }

    #[test]
    fn older_rejections_do_not_exclude_once_broken() {
        let history = vec![
            record(1, "2025-W01", STATUS_REJECTED),
            record(1, "2025-W02", STATUS_REJECTED),
            record(1, "2025-W04", STATUS_CONFIRMED),
        ];
        assert!(rejection_streaks(&history).is_empty());
    }

    #[test]
    fn single_rejection_never_excludes() {
        let history = vec![record(1, "2025-W01", STATUS_REJECTED)];
        assert!(rejection_streaks(&history).is_empty());
    }

    #[test]
    fn rejection_ordering_uses_week_not_prefix() {
        // S-prefixed week 10 is later than W-prefixed week 9.
        let history = vec![
            record(1, "2025-S10", STATUS_CONFIRMED),
            record(1, "2025-W09", STATUS_REJECTED),
            record(1, "2025-W08", STATUS_REJECTED),
        ];
        assert!(rejection_streaks(&history).is_empty());
    }

    #[test]
    fn restricted_stand_filters_category() {
        let pool = vec![
            entrepreneur(1, "ROPA", 0, None),
            entrepreneur(2, "COMIDA", 5, None),
        ];
        let ranker = CandidateRanker::new(&pool, &[], "2025-W10");
        let picked = ranker.select(&stand("Comida"), &PassState::default()).unwrap();
        assert_eq!(picked.id, 2);
    }

    #[test]
    fn used_this_week_is_excluded() {
        let pool = vec![entrepreneur(1, "A", 0, None)];
        let ranker = CandidateRanker::new(&pool, &[], "2025-W10");
        let mut pass = PassState::default();
        pass.record(&pool[0]);
        assert!(ranker.select(&stand(WILDCARD_CATEGORY), &pass).is_none());
    }

    // -----------------------------------------------------------------------
    // Ranking
    // -----------------------------------------------------------------------

    #[test]
    fn never_participated_ranks_first() {
        let pool = vec![entrepreneur(1, "A", 3, None), entrepreneur(2, "A", 0, None)];
        let ranker = CandidateRanker::new(&pool, &[], "2025-W10");
        let picked = ranker
            .select(&stand(WILDCARD_CATEGORY), &PassState::default())
            .unwrap();
        assert_eq!(picked.id, 2);
    }

    #[test]
    fn fewer_participations_then_lower_id() {
        let pool = vec![
            entrepreneur(3, "A", 2, None),
            entrepreneur(2, "A", 1, None),
            entrepreneur(1, "A", 1, None),
        ];
        let ranker = CandidateRanker::new(&pool, &[], "2025-W10");
        let mut pass = PassState::default();
        let mut ids = Vec::new();
        while let Some(picked) = ranker.select(&stand(WILDCARD_CATEGORY), &pass) {
            ids.push(picked.id);
            pass.record(picked);
            pass.start_shift();
        }
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn unused_category_beats_fewer_participations() {
        let pool = vec![entrepreneur(1, "A", 0, None), entrepreneur(2, "B", 7, None)];
        let ranker = CandidateRanker::new(&pool, &[], "2025-W10");
        let mut pass = PassState::default();
        pass.categories_in_shift.insert("A".into());
        assert_eq!(ranker.select(&stand(WILDCARD_CATEGORY), &pass).unwrap().id, 2);
    }

    #[test]
    fn start_shift_resets_categories_only() {
        let e = entrepreneur(1, "a", 0, None);
        let mut pass = PassState::default();
        pass.record(&e);
        pass.start_shift();
        assert!(pass.categories_in_shift.is_empty());
        assert!(pass.used_this_week.contains(&1));
    }

    #[test]
    fn empty_pool_yields_none() {
        let ranker = CandidateRanker::new(&[], &[], "2025-W10");
        assert!(ranker
            .select(&stand(WILDCARD_CATEGORY), &PassState::default())
            .is_none());
    }
}
