//! `UserStore` implementation.

use crate::MemoryStore;
use async_trait::async_trait;
use ecotrace_store::{StoreError, UserStore};
use ecotrace_types::{District, UserId, UserProfile};

#[async_trait]
impl UserStore for MemoryStore {
    async fn get_user(&self, id: &UserId) -> Result<Option<UserProfile>, StoreError> {
        self.check_available()?;
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn put_user(&self, profile: &UserProfile) -> Result<(), StoreError> {
        self.check_available()?;
        self.users
            .lock()
            .unwrap()
            .insert(profile.id.clone(), profile.clone());
        Ok(())
    }

    async fn add_trust(&self, id: &UserId, amount: u32) -> Result<(), StoreError> {
        self.check_available()?;
        let mut map = self.users.lock().unwrap();
        let user = map
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        user.trust_score += amount;
        Ok(())
    }

    async fn credit_action(&self, id: &UserId, points: u32, co2: f64) -> Result<(), StoreError> {
        self.check_available()?;
        self.check_credit_available()?;
        let now = self.server_now();
        let mut map = self.users.lock().unwrap();
        let user = map
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        user.eco_points += points as u64;
        user.co2_saved += co2;
        user.total_actions += 1;
        user.last_active = now;
        Ok(())
    }

    async fn top_by_points(
        &self,
        district: Option<&District>,
        limit: usize,
    ) -> Result<Vec<UserProfile>, StoreError> {
        self.check_available()?;
        let mut users: Vec<UserProfile> = self
            .users
            .lock()
            .unwrap()
            .values()
            .filter(|u| district.map_or(true, |d| &u.district == d))
            .cloned()
            .collect();
        users.sort_by(|a, b| {
            b.eco_points
                .cmp(&a.eco_points)
                .then_with(|| a.id.cmp(&b.id))
        });
        users.truncate(limit);
        Ok(users)
    }
}
