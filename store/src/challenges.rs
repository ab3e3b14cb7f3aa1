//! Challenge storage trait (`challenges` collection).

use crate::StoreError;
use async_trait::async_trait;
use ecotrace_types::{
    ActionType, Challenge, ChallengeId, ChallengeStatus, District, Timestamp, UserId,
};
use serde::{Deserialize, Serialize};

/// Fields of a new challenge. The store assigns `id` and `created_at`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewChallenge {
    pub title: String,
    pub description: String,
    pub district: District,
    pub action_type: Option<ActionType>,
    pub goal: u32,
    pub unit: String,
    pub reward: Option<String>,
    pub start_at: Timestamp,
    pub end_at: Timestamp,
    pub created_by: UserId,
}

/// Query predicates for challenge listings.
#[derive(Clone, Debug, Default)]
pub struct ChallengeFilter {
    pub district: Option<District>,
    pub status: Option<ChallengeStatus>,
}

/// Trait for challenge document operations.
#[async_trait]
pub trait ChallengeStore: Send + Sync {
    /// Persist a new challenge with `status = Active` and zero progress.
    async fn create_challenge(&self, new: NewChallenge) -> Result<Challenge, StoreError>;

    async fn get_challenge(&self, id: &ChallengeId) -> Result<Option<Challenge>, StoreError>;

    async fn list_challenges(
        &self,
        filter: &ChallengeFilter,
    ) -> Result<Vec<Challenge>, StoreError>;

    /// Add `user` to the participant set (set semantics: adding an existing
    /// participant is a no-op). Returns whether the user was newly added;
    /// `participant_count` is incremented only in that case.
    async fn join(&self, id: &ChallengeId, user: &UserId) -> Result<bool, StoreError>;

    /// Atomically increment `current_progress` by `amount`.
    async fn add_progress(&self, id: &ChallengeId, amount: u32) -> Result<(), StoreError>;
}
