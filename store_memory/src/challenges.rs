//! `ChallengeStore` implementation.

use crate::MemoryStore;
use async_trait::async_trait;
use ecotrace_store::{ChallengeFilter, ChallengeStore, NewChallenge, StoreError};
use ecotrace_types::{Challenge, ChallengeId, ChallengeStatus, UserId};

#[async_trait]
impl ChallengeStore for MemoryStore {
    async fn create_challenge(&self, new: NewChallenge) -> Result<Challenge, StoreError> {
        self.check_available()?;
        let challenge = Challenge {
            id: self.next_challenge_id(),
            title: new.title,
            description: new.description,
            district: new.district,
            action_type: new.action_type,
            goal: new.goal,
            unit: new.unit,
            reward: new.reward,
            start_at: new.start_at,
            end_at: new.end_at,
            status: ChallengeStatus::Active,
            current_progress: 0,
            participants: Vec::new(),
            participant_count: 0,
            created_by: new.created_by,
            created_at: self.server_now(),
        };
        self.challenges
            .lock()
            .unwrap()
            .insert(challenge.id.clone(), challenge.clone());
        Ok(challenge)
    }

    async fn get_challenge(&self, id: &ChallengeId) -> Result<Option<Challenge>, StoreError> {
        self.check_available()?;
        Ok(self.challenges.lock().unwrap().get(id).cloned())
    }

    async fn list_challenges(
        &self,
        filter: &ChallengeFilter,
    ) -> Result<Vec<Challenge>, StoreError> {
        self.check_available()?;
        let mut found: Vec<Challenge> = self
            .challenges
            .lock()
            .unwrap()
            .values()
            .filter(|c| filter.district.as_ref().map_or(true, |d| &c.district == d))
            .filter(|c| filter.status.map_or(true, |s| c.status == s))
            .cloned()
            .collect();
        // Soonest-ending first, like the original listing.
        found.sort_by(|a, b| a.end_at.cmp(&b.end_at).then_with(|| a.id.cmp(&b.id)));
        Ok(found)
    }

    async fn join(&self, id: &ChallengeId, user: &UserId) -> Result<bool, StoreError> {
        self.check_available()?;
        let mut map = self.challenges.lock().unwrap();
        let challenge = map
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if challenge.is_participant(user) {
            return Ok(false);
        }
        challenge.participants.push(user.clone());
        challenge.participant_count += 1;
        Ok(true)
    }

    async fn add_progress(&self, id: &ChallengeId, amount: u32) -> Result<(), StoreError> {
        self.check_available()?;
        let mut map = self.challenges.lock().unwrap();
        let challenge = map
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        challenge.current_progress += amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecotrace_types::{District, Timestamp};

    fn new_challenge(district: &str) -> NewChallenge {
        NewChallenge {
            title: "Plant 100 trees".into(),
            description: String::new(),
            district: District::new(district),
            action_type: None,
            goal: 100,
            unit: "trees".into(),
            reward: Some("badge".into()),
            start_at: Timestamp::new(1_000),
            end_at: Timestamp::new(2_000),
            created_by: UserId::new("admin"),
        }
    }

    #[tokio::test]
    async fn join_is_idempotent() {
        let store = MemoryStore::with_clock(1_000);
        let c = store.create_challenge(new_challenge("north")).await.unwrap();
        let bob = UserId::new("bob");

        assert!(store.join(&c.id, &bob).await.unwrap());
        assert!(!store.join(&c.id, &bob).await.unwrap());

        let stored = store.get_challenge(&c.id).await.unwrap().unwrap();
        assert_eq!(stored.participant_count, 1);
        assert_eq!(stored.participants.len(), 1);
    }

    #[tokio::test]
    async fn listing_filters_by_district_and_status() {
        let store = MemoryStore::with_clock(1_000);
        store.create_challenge(new_challenge("north")).await.unwrap();
        store.create_challenge(new_challenge("south")).await.unwrap();

        let filter = ChallengeFilter {
            district: Some(District::new("north")),
            status: Some(ChallengeStatus::Active),
        };
        let found = store.list_challenges(&filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].district, District::new("north"));

        let all = store.list_challenges(&ChallengeFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
