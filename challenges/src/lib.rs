//! Community challenges — CRUD plus join semantics over the `challenges`
//! collection. Structurally like the verification engine but simpler: no
//! consensus, just membership and a progress counter.

pub mod engine;
pub mod error;

pub use engine::{time_remaining, ChallengeDraft, ChallengeEngine};
pub use error::ChallengeError;
