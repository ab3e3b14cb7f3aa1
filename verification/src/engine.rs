//! The verification engine — vote recording and one-shot settlement.

use crate::error::VerifyError;
use crate::tally::quorum_outcome;
use ecotrace_store::{ActionStore, LiveQuery, StoreError, UserStore};
use ecotrace_types::{
    ActionId, ActionStatus, EcoAction, Timestamp, UserId, VerificationParams,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// What a `verify` call accomplished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Vote recorded; the action is still below quorum.
    Recorded { vote_count: u32 },
    /// Vote recorded and this call won the settlement.
    Settled { status: ActionStatus },
    /// Vote recorded and quorum was observed, but a concurrent caller won
    /// the settlement; `status` is the final state that caller produced.
    SettledByPeer { status: ActionStatus },
}

/// Engine for casting votes and settling actions.
///
/// Holds no mutable state of its own: the document store is the only
/// synchronization point, and every rule that must hold across concurrent
/// clients is enforced by one of its atomic primitives.
pub struct VerificationEngine<S: ActionStore + UserStore> {
    store: Arc<S>,
    params: VerificationParams,
}

impl<S: ActionStore + UserStore> VerificationEngine<S> {
    pub fn new(store: Arc<S>, params: VerificationParams) -> Self {
        Self { store, params }
    }

    pub fn params(&self) -> &VerificationParams {
        &self.params
    }

    /// Cast `voter`'s vote on an action and settle it if quorum is reached.
    ///
    /// The append is atomic and server-validated, so two sessions of the same
    /// user cannot double-vote and a settled action accepts no further votes.
    /// Settlement itself runs behind a `Pending → terminal` compare-and-set:
    /// of N concurrent quorum observers, exactly one credits the author.
    pub async fn verify(
        &self,
        action_id: &ActionId,
        voter: &UserId,
        approve: bool,
        now: Timestamp,
    ) -> Result<VerifyOutcome, VerifyError> {
        let action = self.fetch(action_id).await?;

        if &action.author_id == voter {
            return Err(VerifyError::OwnAction(action_id.to_string()));
        }
        if !action.is_completed() {
            return Err(VerifyError::AwaitingCompletion(action_id.to_string()));
        }
        if action.status.is_terminal() {
            return Err(VerifyError::AlreadySettled(action_id.to_string()));
        }
        if action.has_voted(voter) {
            return Err(VerifyError::AlreadyVoted {
                action: action_id.to_string(),
                voter: voter.to_string(),
            });
        }

        let vote = ecotrace_types::Vote {
            voter_id: voter.clone(),
            approve,
            cast_at: now,
        };
        if let Err(err) = self.store.append_vote(action_id, vote).await {
            return Err(self.classify_append_conflict(action_id, voter, err).await);
        }
        debug!(action = %action_id, %voter, approve, "vote recorded");

        // Participation reward, independent of the vote's eventual outcome
        // and of whether this call reaches settlement.
        self.store.add_trust(voter, self.params.trust_reward).await?;

        let action = self.fetch(action_id).await?;
        let Some(final_status) = quorum_outcome(&action.votes, &self.params) else {
            return Ok(VerifyOutcome::Recorded {
                vote_count: action.vote_count,
            });
        };

        self.settle(&action, final_status).await
    }

    /// Execute settlement behind the status compare-and-set.
    async fn settle(
        &self,
        action: &EcoAction,
        final_status: ActionStatus,
    ) -> Result<VerifyOutcome, VerifyError> {
        let won = self
            .store
            .settle_if_pending(&action.id, final_status)
            .await?;
        if !won {
            // A concurrent voter settled first; report what they decided.
            let settled = self.fetch(&action.id).await?;
            debug!(action = %action.id, status = ?settled.status, "settlement lost to peer");
            return Ok(VerifyOutcome::SettledByPeer {
                status: settled.status,
            });
        }

        if final_status == ActionStatus::Verified {
            if let Err(err) = self
                .store
                .credit_action(&action.author_id, action.eco_points, action.co2_impact)
                .await
            {
                // The status transition already committed and cannot rerun;
                // log the owed amounts so the credit can be reconciled.
                error!(
                    action = %action.id,
                    author = %action.author_id,
                    points = action.eco_points,
                    co2 = action.co2_impact,
                    error = %err,
                    "action verified but author credit failed"
                );
                return Err(VerifyError::CreditFailed {
                    action: action.id.to_string(),
                    source: err,
                });
            }
            info!(
                action = %action.id,
                author = %action.author_id,
                points = action.eco_points,
                co2 = action.co2_impact,
                "action verified and author credited"
            );
        } else {
            info!(action = %action.id, "action rejected by community");
        }
        Ok(VerifyOutcome::Settled {
            status: final_status,
        })
    }

    /// A `Conflict` from the atomic append means another session got there
    /// first — either this voter's duplicate or a settlement. Re-read to
    /// report which.
    async fn classify_append_conflict(
        &self,
        action_id: &ActionId,
        voter: &UserId,
        err: StoreError,
    ) -> VerifyError {
        if !matches!(err, StoreError::Conflict(_)) {
            return err.into();
        }
        match self.fetch(action_id).await {
            Ok(action) if action.status.is_terminal() => {
                VerifyError::AlreadySettled(action_id.to_string())
            }
            Ok(_) => VerifyError::AlreadyVoted {
                action: action_id.to_string(),
                voter: voter.to_string(),
            },
            Err(fetch_err) => {
                warn!(action = %action_id, error = %fetch_err, "conflict re-read failed");
                err.into()
            }
        }
    }

    async fn fetch(&self, action_id: &ActionId) -> Result<EcoAction, VerifyError> {
        self.store
            .get_action(action_id)
            .await?
            .ok_or_else(|| VerifyError::NotFound(action_id.to_string()))
    }

    /// Live feed of pending actions backing the verification queue; combine
    /// with [`crate::queue::build_queue`] for the per-viewer read-model.
    pub fn subscribe_pending(&self) -> LiveQuery<EcoAction> {
        self.store.subscribe_pending()
    }

    /// One-shot per-viewer verification queue.
    pub async fn queue_for(
        &self,
        viewer: &UserId,
    ) -> Result<Vec<crate::queue::QueueEntry>, VerifyError> {
        let pending = self.store.list_pending().await?;
        Ok(crate::queue::build_queue(&pending, viewer))
    }
}
