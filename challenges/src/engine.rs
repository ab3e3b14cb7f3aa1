//! Challenge creation, membership and progress.

use crate::ChallengeError;
use ecotrace_store::{ChallengeFilter, ChallengeStore, NewChallenge};
use ecotrace_types::{
    ActionType, Challenge, ChallengeId, District, Timestamp, UserId,
};
use std::sync::Arc;
use tracing::info;

/// User-supplied fields of a new challenge.
#[derive(Clone, Debug)]
pub struct ChallengeDraft {
    pub title: String,
    pub description: String,
    pub district: District,
    pub action_type: Option<ActionType>,
    pub goal: u32,
    pub unit: String,
    pub reward: Option<String>,
    pub start_at: Timestamp,
    pub end_at: Timestamp,
}

/// CRUD + join layer over the `challenges` collection.
pub struct ChallengeEngine<S: ChallengeStore> {
    store: Arc<S>,
}

impl<S: ChallengeStore> ChallengeEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Validate a draft and persist it as an active challenge.
    pub async fn create(
        &self,
        creator: &UserId,
        draft: ChallengeDraft,
    ) -> Result<Challenge, ChallengeError> {
        if draft.title.trim().is_empty() {
            return Err(ChallengeError::MissingTitle);
        }
        if draft.district.as_str().trim().is_empty() {
            return Err(ChallengeError::MissingDistrict);
        }
        if draft.goal == 0 {
            return Err(ChallengeError::ZeroGoal);
        }
        if draft.end_at <= draft.start_at {
            return Err(ChallengeError::InvalidWindow);
        }

        let challenge = self
            .store
            .create_challenge(NewChallenge {
                title: draft.title,
                description: draft.description,
                district: draft.district,
                action_type: draft.action_type,
                goal: draft.goal,
                unit: draft.unit,
                reward: draft.reward,
                start_at: draft.start_at,
                end_at: draft.end_at,
                created_by: creator.clone(),
            })
            .await?;
        info!(challenge = %challenge.id, district = %challenge.district, "challenge created");
        Ok(challenge)
    }

    /// Join a challenge. Idempotent: joining twice is a no-op, and the
    /// participant count moves only on the first join.
    pub async fn join(
        &self,
        id: &ChallengeId,
        user: &UserId,
        now: Timestamp,
    ) -> Result<bool, ChallengeError> {
        let challenge = self
            .store
            .get_challenge(id)
            .await?
            .ok_or_else(|| ChallengeError::NotFound(id.to_string()))?;
        if !challenge.is_open(now) {
            return Err(ChallengeError::Closed(id.to_string()));
        }
        let joined = self.store.join(id, user).await?;
        if joined {
            info!(challenge = %id, %user, "user joined challenge");
        }
        Ok(joined)
    }

    /// Count completed work toward the challenge goal.
    pub async fn record_progress(
        &self,
        id: &ChallengeId,
        amount: u32,
    ) -> Result<(), ChallengeError> {
        if self.store.get_challenge(id).await?.is_none() {
            return Err(ChallengeError::NotFound(id.to_string()));
        }
        Ok(self.store.add_progress(id, amount).await?)
    }

    /// Challenges matching the filter, soonest-ending first.
    pub async fn list(&self, filter: &ChallengeFilter) -> Result<Vec<Challenge>, ChallengeError> {
        Ok(self.store.list_challenges(filter).await?)
    }

    pub async fn get(&self, id: &ChallengeId) -> Result<Challenge, ChallengeError> {
        self.store
            .get_challenge(id)
            .await?
            .ok_or_else(|| ChallengeError::NotFound(id.to_string()))
    }
}

/// Human-oriented remaining time, mirroring the countdown the original UI
/// renders on challenge cards.
pub fn time_remaining(end_at: Timestamp, now: Timestamp) -> String {
    let secs = end_at.remaining_from(now);
    if secs == 0 {
        return "ended".to_string();
    }
    let days = secs / 86_400;
    if days > 0 {
        format!("{days} days")
    } else {
        format!("{} hours", secs / 3_600)
    }
}
