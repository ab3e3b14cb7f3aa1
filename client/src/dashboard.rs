//! Dashboard read-models: personal stats, recent actions, leaderboard,
//! community totals.

use ecotrace_types::{ActionStatus, EcoAction, UserProfile};

/// Everything the dashboard screen renders for one user.
#[derive(Clone, Debug)]
pub struct DashboardView {
    pub profile: UserProfile,
    /// The user's own actions, newest first.
    pub recent_actions: Vec<EcoAction>,
    /// Top profiles in the user's district by points.
    pub leaderboard: Vec<UserProfile>,
}

impl DashboardView {
    /// The user's position on the district leaderboard, if within it.
    pub fn own_rank(&self) -> Option<usize> {
        self.leaderboard
            .iter()
            .position(|u| u.id == self.profile.id)
            .map(|i| i + 1)
    }
}

/// Community-wide totals shown on the landing page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommunityStats {
    pub total_actions: usize,
    pub verified_actions: usize,
    /// Kilograms of CO₂ saved across verified actions.
    pub co2_saved: f64,
}

/// Aggregate community totals from an action snapshot.
///
/// Only verified actions contribute to the CO₂ ledger; pending and rejected
/// ones count toward submissions only.
pub fn community_stats(actions: &[EcoAction]) -> CommunityStats {
    let verified: Vec<&EcoAction> = actions
        .iter()
        .filter(|a| a.status == ActionStatus::Verified)
        .collect();
    CommunityStats {
        total_actions: actions.len(),
        verified_actions: verified.len(),
        co2_saved: verified.iter().map(|a| a.co2_impact).sum(),
    }
}
