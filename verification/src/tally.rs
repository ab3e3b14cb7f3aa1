//! Pure vote tallying.

use ecotrace_types::{ActionStatus, VerificationParams, Vote};

/// Decide an action's final status from its vote list.
///
/// Returns `None` below quorum. At or above quorum the outcome is
/// `Verified` iff the approval threshold is met, `Rejected` otherwise.
/// Pure — the effectful settlement around it lives in the engine.
pub fn quorum_outcome(votes: &[Vote], params: &VerificationParams) -> Option<ActionStatus> {
    if (votes.len() as u32) < params.quorum_votes {
        return None;
    }
    let approvals = votes.iter().filter(|v| v.approve).count() as u32;
    if approvals >= params.approvals_to_verify {
        Some(ActionStatus::Verified)
    } else {
        Some(ActionStatus::Rejected)
    }
}
