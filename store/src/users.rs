//! User profile storage trait (`users` collection).

use crate::StoreError;
use async_trait::async_trait;
use ecotrace_types::{District, UserId, UserProfile};

/// Trait for user profile operations.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user(&self, id: &UserId) -> Result<Option<UserProfile>, StoreError>;

    /// Insert or replace a profile document.
    async fn put_user(&self, profile: &UserProfile) -> Result<(), StoreError>;

    /// Atomically increment the user's trust score.
    ///
    /// Applied once per cast vote, regardless of the vote's eventual outcome.
    async fn add_trust(&self, id: &UserId, amount: u32) -> Result<(), StoreError>;

    /// Atomically apply a settlement credit: `eco_points += points`,
    /// `co2_saved += co2`, `total_actions += 1`, and bump `last_active`.
    async fn credit_action(&self, id: &UserId, points: u32, co2: f64) -> Result<(), StoreError>;

    /// Up to `limit` profiles ordered by `eco_points` descending, optionally
    /// restricted to one district (leaderboards).
    async fn top_by_points(
        &self,
        district: Option<&District>,
        limit: usize,
    ) -> Result<Vec<UserProfile>, StoreError>;
}
