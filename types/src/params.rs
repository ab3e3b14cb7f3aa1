//! Verification parameters.

use serde::{Deserialize, Serialize};

/// Tunable constants of the peer-verification protocol.
///
/// The defaults are normative: voting closes at 3 votes and 2 approvals
/// verify. Deployments may generalise them, but stored data and the test
/// suite assume the literal 3/2 values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationParams {
    /// Number of votes required to close voting on an action.
    pub quorum_votes: u32,
    /// Approving votes (out of `quorum_votes`) required to verify.
    pub approvals_to_verify: u32,
    /// Trust-score reward for casting a vote, independent of outcome.
    pub trust_reward: u32,
}

impl Default for VerificationParams {
    fn default() -> Self {
        Self {
            quorum_votes: 3,
            approvals_to_verify: 2,
            trust_reward: 2,
        }
    }
}
