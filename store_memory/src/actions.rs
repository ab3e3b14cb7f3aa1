//! `ActionStore` implementation.

use crate::MemoryStore;
use async_trait::async_trait;
use ecotrace_store::{ActionStore, LiveQuery, NewAction, StoreError};
use ecotrace_types::action::Evidence;
use ecotrace_types::{ActionId, ActionStatus, EcoAction, Timestamp, UserId, Vote};

#[async_trait]
impl ActionStore for MemoryStore {
    async fn create_action(&self, new: NewAction) -> Result<EcoAction, StoreError> {
        self.check_available()?;
        let action = EcoAction {
            id: self.next_action_id(),
            author_id: new.author_id,
            author_name: new.author_name,
            author_photo: new.author_photo,
            title: new.title,
            description: new.description,
            action_type: new.action_type,
            quantity: new.quantity,
            co2_impact: new.co2_impact,
            eco_points: new.eco_points,
            status: ActionStatus::Pending,
            evidence_before: new.evidence_before,
            evidence_after: None,
            completion_comment: None,
            location: new.location,
            votes: Vec::new(),
            vote_count: 0,
            created_at: self.server_now(),
            completed_at: None,
        };
        let mut map = self.actions.lock().unwrap();
        map.insert(action.id.clone(), action.clone());
        self.publish_actions(&map);
        Ok(action)
    }

    async fn get_action(&self, id: &ActionId) -> Result<Option<EcoAction>, StoreError> {
        self.check_available()?;
        Ok(self.actions.lock().unwrap().get(id).cloned())
    }

    async fn list_actions(&self) -> Result<Vec<EcoAction>, StoreError> {
        self.check_available()?;
        Ok(self.actions.lock().unwrap().values().cloned().collect())
    }

    async fn list_pending(&self) -> Result<Vec<EcoAction>, StoreError> {
        self.check_available()?;
        Ok(self
            .actions
            .lock()
            .unwrap()
            .values()
            .filter(|a| a.status == ActionStatus::Pending)
            .cloned()
            .collect())
    }

    async fn list_by_author(
        &self,
        author: &UserId,
        limit: usize,
    ) -> Result<Vec<EcoAction>, StoreError> {
        self.check_available()?;
        let mut mine: Vec<EcoAction> = self
            .actions
            .lock()
            .unwrap()
            .values()
            .filter(|a| &a.author_id == author)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        mine.truncate(limit);
        Ok(mine)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<EcoAction>, StoreError> {
        self.check_available()?;
        let mut all: Vec<EcoAction> = self.actions.lock().unwrap().values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        all.truncate(limit);
        Ok(all)
    }

    async fn attach_completion(
        &self,
        id: &ActionId,
        evidence_after: Evidence,
        comment: Option<String>,
        completed_at: Timestamp,
    ) -> Result<(), StoreError> {
        self.check_available()?;
        let mut map = self.actions.lock().unwrap();
        let action = map
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        action.evidence_after = Some(evidence_after);
        action.completion_comment = comment;
        action.completed_at = Some(completed_at);
        self.publish_actions(&map);
        Ok(())
    }

    async fn append_vote(&self, id: &ActionId, vote: Vote) -> Result<(), StoreError> {
        self.check_available()?;
        let mut map = self.actions.lock().unwrap();
        let action = map
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if action.status != ActionStatus::Pending {
            return Err(StoreError::Conflict(format!(
                "action {id} is no longer pending"
            )));
        }
        if action.has_voted(&vote.voter_id) {
            return Err(StoreError::Conflict(format!(
                "voter {} already voted on {id}",
                vote.voter_id
            )));
        }
        // Append + counter increment under one lock: the lockstep invariant
        // is never observable as violated.
        action.votes.push(vote);
        action.vote_count += 1;
        debug_assert!(action.vote_count_consistent());
        self.publish_actions(&map);
        Ok(())
    }

    async fn settle_if_pending(
        &self,
        id: &ActionId,
        final_status: ActionStatus,
    ) -> Result<bool, StoreError> {
        self.check_available()?;
        debug_assert!(final_status.is_terminal());
        let mut map = self.actions.lock().unwrap();
        let action = map
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if action.status != ActionStatus::Pending {
            return Ok(false);
        }
        action.status = final_status;
        self.publish_actions(&map);
        Ok(true)
    }

    fn subscribe_all(&self) -> LiveQuery<EcoAction> {
        LiveQuery::new(self.all_tx.subscribe())
    }

    fn subscribe_pending(&self) -> LiveQuery<EcoAction> {
        LiveQuery::new(self.pending_tx.subscribe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecotrace_types::ActionType;

    fn new_action(author: &str) -> NewAction {
        NewAction {
            author_id: UserId::new(author),
            author_name: author.to_string(),
            author_photo: None,
            title: "Park cleanup".into(),
            description: "picked up litter".into(),
            action_type: ActionType::Cleanup,
            quantity: 2,
            co2_impact: 4.0,
            eco_points: 30,
            evidence_before: Evidence::new("before.jpg"),
            location: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_server_timestamp() {
        let store = MemoryStore::with_clock(1_000);
        let a = store.create_action(new_action("alice")).await.unwrap();
        assert_eq!(a.created_at, Timestamp::new(1_000));
        assert_eq!(a.status, ActionStatus::Pending);
        assert_eq!(a.vote_count, 0);

        store.advance_clock(60);
        let b = store.create_action(new_action("bob")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(b.created_at, Timestamp::new(1_060));
    }

    #[tokio::test]
    async fn append_vote_rejects_duplicates_atomically() {
        let store = MemoryStore::with_clock(1_000);
        let a = store.create_action(new_action("alice")).await.unwrap();
        let vote = Vote {
            voter_id: UserId::new("bob"),
            approve: true,
            cast_at: Timestamp::new(1_001),
        };
        store.append_vote(&a.id, vote.clone()).await.unwrap();
        let err = store.append_vote(&a.id, vote).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));

        let stored = store.get_action(&a.id).await.unwrap().unwrap();
        assert_eq!(stored.vote_count, 1);
        assert!(stored.vote_count_consistent());
    }

    #[tokio::test]
    async fn append_vote_rejects_settled_actions() {
        let store = MemoryStore::with_clock(1_000);
        let a = store.create_action(new_action("alice")).await.unwrap();
        assert!(store
            .settle_if_pending(&a.id, ActionStatus::Rejected)
            .await
            .unwrap());
        let err = store
            .append_vote(
                &a.id,
                Vote {
                    voter_id: UserId::new("bob"),
                    approve: true,
                    cast_at: Timestamp::new(1_001),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn settle_if_pending_has_single_winner() {
        let store = MemoryStore::with_clock(1_000);
        let a = store.create_action(new_action("alice")).await.unwrap();
        assert!(store
            .settle_if_pending(&a.id, ActionStatus::Verified)
            .await
            .unwrap());
        assert!(!store
            .settle_if_pending(&a.id, ActionStatus::Verified)
            .await
            .unwrap());
        assert!(!store
            .settle_if_pending(&a.id, ActionStatus::Rejected)
            .await
            .unwrap());
        let stored = store.get_action(&a.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ActionStatus::Verified);
    }

    #[tokio::test]
    async fn pending_subscription_tracks_settlement() {
        let store = MemoryStore::with_clock(1_000);
        let live = store.subscribe_pending();
        let a = store.create_action(new_action("alice")).await.unwrap();
        assert_eq!(live.current().len(), 1);

        store
            .settle_if_pending(&a.id, ActionStatus::Verified)
            .await
            .unwrap();
        assert!(live.current().is_empty());
        assert_eq!(store.subscribe_all().current().len(), 1);
    }

    #[tokio::test]
    async fn outage_surfaces_as_unavailable() {
        let store = MemoryStore::with_clock(1_000);
        store.set_unavailable(true);
        let err = store.create_action(new_action("alice")).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
        store.set_unavailable(false);
        assert!(store.create_action(new_action("alice")).await.is_ok());
    }
}
