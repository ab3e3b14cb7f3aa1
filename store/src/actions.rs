//! Action storage trait (`ecoActions` collection).

use crate::live::LiveQuery;
use crate::StoreError;
use async_trait::async_trait;
use ecotrace_types::action::Evidence;
use ecotrace_types::{ActionId, ActionStatus, ActionType, EcoAction, GeoPoint, Timestamp, UserId, Vote};
use serde::{Deserialize, Serialize};

/// Fields of a new pending action. The store assigns `id` and `created_at`.
///
/// `co2_impact` and `eco_points` arrive pre-derived from the registry; the
/// store persists them as-is and never recomputes them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewAction {
    pub author_id: UserId,
    pub author_name: String,
    pub author_photo: Option<String>,
    pub title: String,
    pub description: String,
    pub action_type: ActionType,
    pub quantity: u32,
    pub co2_impact: f64,
    pub eco_points: u32,
    pub evidence_before: Evidence,
    pub location: Option<GeoPoint>,
}

/// Trait for action document operations.
///
/// `append_vote` and `settle_if_pending` carry the concurrency requirements
/// of the verification protocol; everything else is plain CRUD and query
/// shaping.
#[async_trait]
pub trait ActionStore: Send + Sync {
    /// Persist a new action with `status = Pending` and an empty vote list.
    async fn create_action(&self, new: NewAction) -> Result<EcoAction, StoreError>;

    async fn get_action(&self, id: &ActionId) -> Result<Option<EcoAction>, StoreError>;

    /// All actions, unordered (map/list views filter client-side).
    async fn list_actions(&self) -> Result<Vec<EcoAction>, StoreError>;

    /// Actions with `status == Pending` (the server-side half of the
    /// verification-queue predicate).
    async fn list_pending(&self) -> Result<Vec<EcoAction>, StoreError>;

    /// Up to `limit` of the author's actions, newest first.
    async fn list_by_author(
        &self,
        author: &UserId,
        limit: usize,
    ) -> Result<Vec<EcoAction>, StoreError>;

    /// Up to `limit` most recently created actions.
    async fn recent(&self, limit: usize) -> Result<Vec<EcoAction>, StoreError>;

    /// Set `evidence_after`, the completion comment and `completed_at`.
    ///
    /// Fails with [`StoreError::NotFound`] if the action does not exist.
    async fn attach_completion(
        &self,
        id: &ActionId,
        evidence_after: Evidence,
        comment: Option<String>,
        completed_at: Timestamp,
    ) -> Result<(), StoreError>;

    /// Atomically append `vote` to `votes` and increment `vote_count`.
    ///
    /// The append is validated server-side under the same atomic step:
    /// fails with [`StoreError::Conflict`] if the voter already appears in
    /// `votes` or the action is no longer `Pending`. Two concurrent voters
    /// must both be reflected; two sessions of the *same* voter must not be.
    async fn append_vote(&self, id: &ActionId, vote: Vote) -> Result<(), StoreError>;

    /// Compare-and-set `status` from `Pending` to `final_status`.
    ///
    /// Returns `true` iff this caller won the transition. At most one caller
    /// ever receives `true` for a given action; the winner performs the
    /// settlement credit.
    async fn settle_if_pending(
        &self,
        id: &ActionId,
        final_status: ActionStatus,
    ) -> Result<bool, StoreError>;

    /// Live view of all actions (map/list screens).
    fn subscribe_all(&self) -> LiveQuery<EcoAction>;

    /// Live view of pending actions (verification queue).
    fn subscribe_pending(&self) -> LiveQuery<EcoAction>;
}
