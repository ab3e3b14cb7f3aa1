//! Peer-verification consensus.
//!
//! An unverified action accumulates independent votes; at quorum (3 votes) it
//! settles exactly once to `Verified` (≥ 2 approvals) or `Rejected`, and a
//! verified settlement credits the author's counters exactly once.
//!
//! The flow:
//! 1. A voter casts a vote — one atomic append + counter increment.
//! 2. The voter's trust score is rewarded unconditionally.
//! 3. The vote list is re-read; at quorum, settlement runs behind a
//!    compare-and-set on `status`, so concurrent quorum observers produce
//!    exactly one credit.

pub mod engine;
pub mod error;
pub mod queue;
pub mod tally;

pub use engine::{VerificationEngine, VerifyOutcome};
pub use error::VerifyError;
pub use queue::{build_queue, QueueEntry};
pub use tally::quorum_outcome;
