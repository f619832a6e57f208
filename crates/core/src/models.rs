//! Domain records shared between the scheduler and the storage layer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::slot::{Block, Shift, SlotKey};
use crate::types::{DbId, StandId, Timestamp};

/// Status given to every assignment the scheduler creates.
pub const STATUS_INVITED: &str = "invited";
/// Entrepreneur accepted the invitation.
pub const STATUS_CONFIRMED: &str = "confirmed";
/// Entrepreneur declined. Two in a row exclude them from generation.
pub const STATUS_REJECTED: &str = "rejected";

// ---------------------------------------------------------------------------
// Entrepreneur
// ---------------------------------------------------------------------------

/// A registered entrepreneur and their rotation counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entrepreneur {
    pub id: DbId,
    pub name: String,
    /// Normalized category label.
    pub category: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub times_assigned: i32,
    pub last_participation_week: Option<String>,
    pub created_at: Timestamp,
}

impl Entrepreneur {
    pub fn counters(&self) -> RotationCounters {
        RotationCounters {
            times_assigned: self.times_assigned,
            last_participation_week: self.last_participation_week.clone(),
        }
    }
}

/// Input for registering an entrepreneur. Counters always start at 0/null.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEntrepreneur {
    pub name: String,
    pub category: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// The denormalized participation summary kept on each entrepreneur.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationCounters {
    pub times_assigned: i32,
    pub last_participation_week: Option<String>,
}

// ---------------------------------------------------------------------------
// Assignment
// ---------------------------------------------------------------------------

/// One entrepreneur placed in one slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: Uuid,
    pub entrepreneur_id: DbId,
    pub stand_id: StandId,
    pub week: String,
    pub block: Block,
    pub shift: Shift,
    pub status: String,
    pub attended: Option<bool>,
    /// Free text. The survey module stores serialized payloads here.
    pub comments: Option<String>,
    pub created_at: Timestamp,
}

impl Assignment {
    /// A fresh assignment with a new id and the given status.
    pub fn new(
        entrepreneur_id: DbId,
        stand_id: StandId,
        week: &str,
        block: Block,
        shift: Shift,
        status: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            entrepreneur_id,
            stand_id,
            week: week.to_string(),
            block,
            shift,
            status: status.to_string(),
            attended: None,
            comments: None,
            created_at: chrono::Utc::now(),
        }
    }

    /// A scheduler-created assignment (`status = "invited"`).
    pub fn invited(
        entrepreneur_id: DbId,
        stand_id: StandId,
        week: &str,
        block: Block,
        shift: Shift,
    ) -> Self {
        Self::new(entrepreneur_id, stand_id, week, block, shift, STATUS_INVITED)
    }

    pub fn slot_key(&self) -> SlotKey {
        SlotKey {
            stand_id: self.stand_id,
            week: self.week.clone(),
            block: self.block,
            shift: self.shift,
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.status == STATUS_REJECTED
    }
}

/// Canonical stored form of a status: trimmed and lowercase.
pub fn normalize_status(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Partial update of an assignment's follow-up fields. `None` leaves the
/// stored value unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignmentPatch {
    pub status: Option<String>,
    pub attended: Option<bool>,
    pub comments: Option<String>,
}

impl AssignmentPatch {
    /// Apply the patch to an in-memory record.
    pub fn apply_to(&self, assignment: &mut Assignment) {
        if let Some(status) = &self.status {
            assignment.status = status.clone();
        }
        if let Some(attended) = self.attended {
            assignment.attended = Some(attended);
        }
        if let Some(comments) = &self.comments {
            assignment.comments = Some(comments.clone());
        }
    }
}
