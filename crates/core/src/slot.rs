//! Slot grid and occupancy rules.
//!
//! A slot is `(stand, week, block, shift)`. The grid for one week is every
//! configured stand crossed with the three blocks and the two half-day
//! shifts; `full-day` is only ever set by hand and occupies both halves.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::category::WILDCARD_CATEGORY;
use crate::error::CoreError;
use crate::types::StandId;
use crate::week::same_week;

/// Default number of physical stands.
pub const DEFAULT_STAND_COUNT: StandId = 6;

// ---------------------------------------------------------------------------
// Block
// ---------------------------------------------------------------------------

/// Recurring multi-day grouping within a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Block {
    #[serde(rename = "mon-tue")]
    MonTue,
    #[serde(rename = "wed-thu")]
    WedThu,
    #[serde(rename = "fri")]
    Fri,
}

impl Block {
    /// Blocks in scheduler traversal order.
    pub const ALL: [Block; 3] = [Block::MonTue, Block::WedThu, Block::Fri];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MonTue => "mon-tue",
            Self::WedThu => "wed-thu",
            Self::Fri => "fri",
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Block {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mon-tue" => Ok(Self::MonTue),
            "wed-thu" => Ok(Self::WedThu),
            "fri" => Ok(Self::Fri),
            other => Err(CoreError::Validation(format!("Unknown block: {other}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Shift
// ---------------------------------------------------------------------------

/// Sub-division of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shift {
    Morning,
    Afternoon,
    FullDay,
}

impl Shift {
    /// Shifts the automatic scheduler fills, in traversal order.
    pub const GENERATED: [Shift; 2] = [Shift::Morning, Shift::Afternoon];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::FullDay => "full-day",
        }
    }

    /// Read a stored shift column. Records without a shift predate half-day
    /// scheduling and occupy the whole block.
    pub fn from_stored(raw: Option<&str>) -> Result<Self, CoreError> {
        match raw {
            None => Ok(Self::FullDay),
            Some(s) if s.trim().is_empty() => Ok(Self::FullDay),
            Some(s) => s.parse(),
        }
    }

    /// Exclusivity rule: `full-day` conflicts with everything on the same
    /// block, half-day shifts only conflict with themselves.
    pub fn conflicts_with(self, other: Shift) -> bool {
        self == Shift::FullDay || other == Shift::FullDay || self == other
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shift {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "full-day" => Ok(Self::FullDay),
            other => Err(CoreError::Validation(format!("Unknown shift: {other}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Stands and grid
// ---------------------------------------------------------------------------

/// A physical stand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stand {
    pub id: StandId,
    pub name: String,
    /// Either [`WILDCARD_CATEGORY`] or the only category the stand hosts.
    pub category: String,
}

/// Configured stand list. The slot grid is derived from it on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridConfig {
    pub stands: Vec<Stand>,
}

impl GridConfig {
    /// `count` wildcard stands numbered from 1. Non-positive counts yield an
    /// empty grid.
    pub fn with_stand_count(count: StandId) -> Self {
        let stands = (1..=count)
            .map(|n| Stand {
                id: n,
                name: format!("Stand {n}"),
                category: WILDCARD_CATEGORY.to_string(),
            })
            .collect();
        Self { stands }
    }

    pub fn stand(&self, id: StandId) -> Option<&Stand> {
        self.stands.iter().find(|s| s.id == id)
    }

    /// All generated slots for one week in traversal order: block, then
    /// shift, then stand.
    pub fn generation_order(&self) -> impl Iterator<Item = (Block, Shift, &Stand)> + '_ {
        Block::ALL.into_iter().flat_map(move |block| {
            Shift::GENERATED
                .into_iter()
                .flat_map(move |shift| self.stands.iter().map(move |stand| (block, shift, stand)))
        })
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::with_stand_count(DEFAULT_STAND_COUNT)
    }
}

// ---------------------------------------------------------------------------
// Slot keys
// ---------------------------------------------------------------------------

/// Occupancy key of a single slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotKey {
    pub stand_id: StandId,
    pub week: String,
    pub block: Block,
    pub shift: Shift,
}

impl SlotKey {
    /// Whether `other` would double-book this slot: same stand, same week
    /// (either prefix), same block and conflicting shifts.
    pub fn conflicts_with(&self, other: &SlotKey) -> bool {
        self.stand_id == other.stand_id
            && self.block == other.block
            && self.shift.conflicts_with(other.shift)
            && same_week(&self.week, &other.week)
    }

    /// Exact match, used when removing a specific slot.
    pub fn matches(&self, other: &SlotKey) -> bool {
        self.stand_id == other.stand_id
            && self.block == other.block
            && self.shift == other.shift
            && same_week(&self.week, &other.week)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(stand_id: StandId, week: &str, block: Block, shift: Shift) -> SlotKey {
        SlotKey {
            stand_id,
            week: week.to_string(),
            block,
            shift,
        }
    }

    // -----------------------------------------------------------------------
    // Shift exclusivity
    // -----------------------------------------------------------------------

    #[test]
    fn full_day_conflicts_with_everything() {
        for other in [Shift::Morning, Shift::Afternoon, Shift::FullDay] {
            assert!(Shift::FullDay.conflicts_with(other));
            assert!(other.conflicts_with(Shift::FullDay));
        }
    }

    #[test]
    fn half_days_are_independent() {
        assert!(!Shift::Morning.conflicts_with(Shift::Afternoon));
        assert!(Shift::Morning.conflicts_with(Shift::Morning));
        assert!(Shift::Afternoon.conflicts_with(Shift::Afternoon));
    }

    #[test]
    fn missing_shift_reads_as_full_day() {
        assert_eq!(Shift::from_stored(None).unwrap(), Shift::FullDay);
        assert_eq!(Shift::from_stored(Some("")).unwrap(), Shift::FullDay);
        assert_eq!(Shift::from_stored(Some("morning")).unwrap(), Shift::Morning);
        assert!(Shift::from_stored(Some("evening")).is_err());
    }

    // -----------------------------------------------------------------------
    // Parse / serde names
    // -----------------------------------------------------------------------

    #[test]
    fn block_names_round_trip_through_from_str() {
        for block in Block::ALL {
            assert_eq!(block.as_str().parse::<Block>().unwrap(), block);
        }
        assert!("sat".parse::<Block>().is_err());
    }

    #[test]
    fn display_uses_wire_names() {
        assert_eq!(Shift::FullDay.to_string(), "full-day");
        assert_eq!(Block::WedThu.to_string(), "wed-thu");
    }

    // -----------------------------------------------------------------------
    // Slot keys
    // -----------------------------------------------------------------------

    #[test]
    fn slot_conflict_requires_same_stand_week_and_block() {
        let morning = key(1, "2025-W10", Block::MonTue, Shift::Morning);
        assert!(morning.conflicts_with(&key(1, "2025-S10", Block::MonTue, Shift::FullDay)));
        assert!(!morning.conflicts_with(&key(2, "2025-W10", Block::MonTue, Shift::FullDay)));
        assert!(!morning.conflicts_with(&key(1, "2025-W11", Block::MonTue, Shift::FullDay)));
        assert!(!morning.conflicts_with(&key(1, "2025-W10", Block::Fri, Shift::FullDay)));
        assert!(!morning.conflicts_with(&key(1, "2025-W10", Block::MonTue, Shift::Afternoon)));
    }

    // -----------------------------------------------------------------------
    // Grid
    // -----------------------------------------------------------------------

    #[test]
    fn default_grid_has_six_wildcard_stands() {
        let grid = GridConfig::default();
        assert_eq!(grid.stands.len(), 6);
        assert_eq!(grid.stands[0].id, 1);
        assert_eq!(grid.stands[5].id, 6);
        assert!(grid.stands.iter().all(|s| s.category == WILDCARD_CATEGORY));
    }

    #[test]
    fn stand_ids_cover_the_full_smallint_range() {
        assert!(GridConfig::with_stand_count(0).stands.is_empty());
        let grid = GridConfig::with_stand_count(StandId::MAX);
        assert_eq!(grid.stands.len(), StandId::MAX as usize);
        assert_eq!(grid.stands.last().map(|s| s.id), Some(StandId::MAX));
    }

    #[test]
    fn generation_order_is_block_then_shift_then_stand() {
        let grid = GridConfig::with_stand_count(2);
        let order: Vec<_> = grid
            .generation_order()
            .map(|(b, s, stand)| (b, s, stand.id))
            .collect();
        assert_eq!(order.len(), 12);
        assert_eq!(order[0], (Block::MonTue, Shift::Morning, 1));
        assert_eq!(order[1], (Block::MonTue, Shift::Morning, 2));
        assert_eq!(order[2], (Block::MonTue, Shift::Afternoon, 1));
        assert_eq!(order[4], (Block::WedThu, Shift::Morning, 1));
        assert_eq!(order[11], (Block::Fri, Shift::Afternoon, 2));
    }
}
