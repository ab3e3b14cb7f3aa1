//! User profile documents.

use crate::geo::District;
use crate::id::UserId;
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};

/// Per-identity profile document (`users` collection).
///
/// Created on first successful sign-in, never deleted by this client.
/// The three activity counters are monotonically non-decreasing and are
/// mutated only by settlement of one of the user's own actions; `trust_score`
/// is incremented each time the user casts a vote, independent of outcome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub display_name: String,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub district: District,
    pub eco_points: u64,
    pub co2_saved: f64,
    pub total_actions: u64,
    pub trust_score: u32,
    pub streak: u32,
    pub badges: Vec<String>,
    pub joined_at: Timestamp,
    pub last_active: Timestamp,
}

impl UserProfile {
    /// Trust score assigned to freshly created profiles.
    pub const INITIAL_TRUST: u32 = 50;

    /// A fresh profile with zeroed counters, as written on first sign-in.
    pub fn new(
        id: UserId,
        display_name: impl Into<String>,
        district: District,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            email: None,
            photo_url: None,
            district,
            eco_points: 0,
            co2_saved: 0.0,
            total_actions: 0,
            trust_score: Self::INITIAL_TRUST,
            streak: 0,
            badges: Vec::new(),
            joined_at: now,
            last_active: now,
        }
    }
}
