//! Community challenge documents.

use crate::action::ActionType;
use crate::geo::District;
use crate::id::{ChallengeId, UserId};
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a challenge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeStatus {
    Active,
    Completed,
}

/// A district-scoped, time-boxed community goal (`challenges` collection).
///
/// Structurally a simpler CRUD entity than an action: no consensus, just a
/// participant set and a progress counter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: ChallengeId,
    pub title: String,
    pub description: String,
    pub district: District,
    /// Restricts the challenge to one action type; `None` counts any type.
    pub action_type: Option<ActionType>,
    pub goal: u32,
    /// Display unit for the goal ("actions", "trees", ...).
    pub unit: String,
    pub reward: Option<String>,
    pub start_at: Timestamp,
    pub end_at: Timestamp,
    pub status: ChallengeStatus,
    pub current_progress: u32,
    pub participants: Vec<UserId>,
    /// Denormalised counter, kept in lockstep with `participants` by the store.
    pub participant_count: u32,
    pub created_by: UserId,
    pub created_at: Timestamp,
}

impl Challenge {
    pub fn is_participant(&self, user: &UserId) -> bool {
        self.participants.iter().any(|p| p == user)
    }

    /// Whether the challenge still accepts joins and progress at `now`.
    pub fn is_open(&self, now: Timestamp) -> bool {
        self.status == ChallengeStatus::Active && !self.end_at.has_passed(now)
    }

    /// Progress toward the goal, clamped to 100.
    pub fn progress_percent(&self) -> u32 {
        if self.goal == 0 {
            return 0;
        }
        (self.current_progress as u64 * 100 / self.goal as u64).min(100) as u32
    }
}
