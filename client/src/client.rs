//! The client facade.

use crate::dashboard::{community_stats, CommunityStats, DashboardView};
use crate::session::ensure_profile;
use crate::{ClientConfig, ClientError};
use ecotrace_challenges::{ChallengeDraft, ChallengeEngine};
use ecotrace_registry::{ActionDraft, ActionRegistry};
use ecotrace_store::{
    ActionStore, ChallengeFilter, ChallengeStore, LiveQuery, UserStore,
};
use ecotrace_types::action::Evidence;
use ecotrace_types::{
    ActionId, Challenge, ChallengeId, Clock, CurrentUser, EcoAction, SystemClock, UserProfile,
};
use ecotrace_types::identity::IdentityProvider;
use ecotrace_verification::{QueueEntry, VerificationEngine, VerifyOutcome};
use std::sync::Arc;
use tracing::warn;

/// Everything one signed-in browser session needs: identity, store handle,
/// and the three engines. No globals — tests construct as many independent
/// clients over one shared store as they need concurrent "users".
pub struct EcoClient<S, I>
where
    S: ActionStore + UserStore + ChallengeStore + 'static,
    I: IdentityProvider,
{
    identity: Arc<I>,
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    registry: ActionRegistry<S>,
    verification: VerificationEngine<S>,
    challenges: ChallengeEngine<S>,
    config: ClientConfig,
}

impl<S, I> EcoClient<S, I>
where
    S: ActionStore + UserStore + ChallengeStore + 'static,
    I: IdentityProvider,
{
    /// A client over the real wall clock.
    pub fn new(identity: Arc<I>, store: Arc<S>, config: ClientConfig) -> Self {
        Self::with_clock(identity, store, config, Arc::new(SystemClock))
    }

    /// A client with an injected clock (deterministic tests).
    pub fn with_clock(
        identity: Arc<I>,
        store: Arc<S>,
        config: ClientConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry: ActionRegistry::new(Arc::clone(&store)),
            verification: VerificationEngine::new(Arc::clone(&store), config.verification),
            challenges: ChallengeEngine::new(Arc::clone(&store)),
            identity,
            store,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The signed-in user, or the sign-in prompt error.
    ///
    /// Resolved from the provider on every call, never cached: a sign-out is
    /// observed by the next operation.
    fn require_user(&self) -> Result<CurrentUser, ClientError> {
        self.identity
            .current_user()
            .ok_or(ClientError::NotAuthenticated)
    }

    /// Fetch (or create, on first sign-in) the current user's profile.
    pub async fn sign_in_profile(&self) -> Result<UserProfile, ClientError> {
        let user = self.require_user()?;
        surfaced(
            "sign_in_profile",
            ensure_profile(
                self.store.as_ref(),
                &user,
                &self.config.default_district,
                self.clock.now(),
            )
            .await,
        )
    }

    /// Submit a new eco-action.
    pub async fn submit_action(&self, draft: ActionDraft) -> Result<EcoAction, ClientError> {
        let user = self.require_user()?;
        surfaced(
            "submit_action",
            self.registry
                .create(&user, draft)
                .await
                .map_err(ClientError::from),
        )
    }

    /// Attach after-evidence to one of the current user's own actions.
    pub async fn complete_action(
        &self,
        action_id: &ActionId,
        evidence_after: Evidence,
        comment: Option<String>,
    ) -> Result<(), ClientError> {
        let user = self.require_user()?;
        surfaced(
            "complete_action",
            self.registry
                .attach_completion(action_id, &user.id, evidence_after, comment, self.clock.now())
                .await
                .map_err(ClientError::from),
        )
    }

    /// Cast the current user's vote on an action.
    pub async fn verify_action(
        &self,
        action_id: &ActionId,
        approve: bool,
    ) -> Result<VerifyOutcome, ClientError> {
        let user = self.require_user()?;
        surfaced(
            "verify_action",
            self.verification
                .verify(action_id, &user.id, approve, self.clock.now())
                .await
                .map_err(ClientError::from),
        )
    }

    /// The current user's verification queue (one-shot).
    pub async fn verification_queue(&self) -> Result<Vec<QueueEntry>, ClientError> {
        let user = self.require_user()?;
        surfaced(
            "verification_queue",
            self.verification
                .queue_for(&user.id)
                .await
                .map_err(ClientError::from),
        )
    }

    /// Live feed backing the verification queue; pair snapshots with
    /// [`ecotrace_verification::build_queue`] for the per-viewer view.
    pub fn subscribe_queue(&self) -> LiveQuery<EcoAction> {
        self.verification.subscribe_pending()
    }

    /// Live feed of all actions (map and list screens).
    pub fn subscribe_actions(&self) -> LiveQuery<EcoAction> {
        self.registry.subscribe_all()
    }

    /// Create a community challenge.
    pub async fn create_challenge(&self, draft: ChallengeDraft) -> Result<Challenge, ClientError> {
        let user = self.require_user()?;
        surfaced(
            "create_challenge",
            self.challenges
                .create(&user.id, draft)
                .await
                .map_err(ClientError::from),
        )
    }

    /// Join a challenge. Idempotent.
    pub async fn join_challenge(&self, id: &ChallengeId) -> Result<bool, ClientError> {
        let user = self.require_user()?;
        surfaced(
            "join_challenge",
            self.challenges
                .join(id, &user.id, self.clock.now())
                .await
                .map_err(ClientError::from),
        )
    }

    /// Challenges matching the filter.
    pub async fn challenges(
        &self,
        filter: &ChallengeFilter,
    ) -> Result<Vec<Challenge>, ClientError> {
        surfaced(
            "challenges",
            self.challenges.list(filter).await.map_err(ClientError::from),
        )
    }

    /// The dashboard view for the current user.
    pub async fn dashboard(&self) -> Result<DashboardView, ClientError> {
        let profile = self.sign_in_profile().await?;
        let recent_actions = self
            .registry
            .by_author(&profile.id, self.config.recent_actions)
            .await
            .map_err(ClientError::from)?;
        let leaderboard = self
            .store
            .top_by_points(Some(&profile.district), self.config.leaderboard_size)
            .await?;
        Ok(DashboardView {
            profile,
            recent_actions,
            leaderboard,
        })
    }

    /// Community-wide totals for the landing page.
    pub async fn community_stats(&self) -> Result<CommunityStats, ClientError> {
        let actions = surfaced(
            "community_stats",
            self.store.list_actions().await.map_err(ClientError::from),
        )?;
        Ok(community_stats(&actions))
    }
}

/// Log a failed operation before handing it to the presentation layer.
/// Nothing here is fatal; the user retries manually.
fn surfaced<T>(op: &'static str, result: Result<T, ClientError>) -> Result<T, ClientError> {
    if let Err(err) = &result {
        warn!(%op, error = %err, "operation failed");
    }
    result
}
