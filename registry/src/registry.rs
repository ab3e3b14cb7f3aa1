//! Action creation, completion and read-back.

use crate::RegistryError;
use ecotrace_store::{ActionStore, LiveQuery, NewAction};
use ecotrace_types::action::Evidence;
use ecotrace_types::{
    ActionId, ActionStatus, ActionType, CurrentUser, EcoAction, GeoPoint, Timestamp, UserId,
};
use std::sync::Arc;
use tracing::info;

/// User-supplied fields of a new action.
#[derive(Clone, Debug)]
pub struct ActionDraft {
    pub title: String,
    pub description: String,
    pub action_type: ActionType,
    pub quantity: u32,
    pub evidence_before: Evidence,
    pub location: Option<GeoPoint>,
}

/// CRUD layer over the `ecoActions` collection.
pub struct ActionRegistry<S: ActionStore> {
    store: Arc<S>,
}

impl<S: ActionStore> ActionRegistry<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Validate a draft and persist it as a pending action.
    ///
    /// `co2_impact` and `eco_points` are derived here from the type table and
    /// never recomputed afterwards. No partial write happens on validation
    /// failure.
    pub async fn create(
        &self,
        author: &CurrentUser,
        draft: ActionDraft,
    ) -> Result<EcoAction, RegistryError> {
        if draft.title.trim().is_empty() {
            return Err(RegistryError::MissingTitle);
        }
        if draft.evidence_before.is_empty() {
            return Err(RegistryError::MissingEvidence);
        }
        if draft.location.is_none() {
            return Err(RegistryError::MissingLocation);
        }
        if draft.quantity == 0 {
            return Err(RegistryError::ZeroQuantity);
        }

        let co2_impact = draft.action_type.co2_per_unit() * draft.quantity as f64;
        let eco_points = draft.action_type.points();
        let action = self
            .store
            .create_action(NewAction {
                author_id: author.id.clone(),
                author_name: author.display_name.clone(),
                author_photo: author.photo_url.clone(),
                title: draft.title,
                description: draft.description,
                action_type: draft.action_type,
                quantity: draft.quantity,
                co2_impact,
                eco_points,
                evidence_before: draft.evidence_before,
                location: draft.location,
            })
            .await?;

        info!(
            action = %action.id,
            author = %action.author_id,
            kind = %action.action_type,
            co2 = action.co2_impact,
            "action created"
        );
        Ok(action)
    }

    /// Attach after-evidence, making the action eligible for the
    /// verification queue.
    ///
    /// Restricted to the original author, and only while the action is still
    /// pending and uncompleted.
    pub async fn attach_completion(
        &self,
        action_id: &ActionId,
        caller: &UserId,
        evidence_after: Evidence,
        comment: Option<String>,
        now: Timestamp,
    ) -> Result<(), RegistryError> {
        if evidence_after.is_empty() {
            return Err(RegistryError::MissingEvidence);
        }
        let action = self
            .store
            .get_action(action_id)
            .await?
            .ok_or_else(|| RegistryError::NotFound(action_id.to_string()))?;

        if &action.author_id != caller {
            return Err(RegistryError::NotAuthor(action_id.to_string()));
        }
        if action.status != ActionStatus::Pending {
            return Err(RegistryError::NotPending(action_id.to_string()));
        }
        if action.is_completed() {
            return Err(RegistryError::AlreadyCompleted(action_id.to_string()));
        }

        self.store
            .attach_completion(action_id, evidence_after, comment, now)
            .await?;
        info!(action = %action_id, "completion evidence attached");
        Ok(())
    }

    /// Live view of every action, for the map and list screens.
    pub fn subscribe_all(&self) -> LiveQuery<EcoAction> {
        self.store.subscribe_all()
    }

    /// The `limit` most recently created actions.
    pub async fn recent(&self, limit: usize) -> Result<Vec<EcoAction>, RegistryError> {
        Ok(self.store.recent(limit).await?)
    }

    /// Up to `limit` of one author's actions, newest first.
    pub async fn by_author(
        &self,
        author: &UserId,
        limit: usize,
    ) -> Result<Vec<EcoAction>, RegistryError> {
        Ok(self.store.list_by_author(author, limit).await?)
    }
}
