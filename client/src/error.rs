//! User-facing error surface.
//!
//! Four failure families reach the presentation layer: a sign-in prompt, an
//! inline validation message, a stale-document notice, and a non-fatal
//! "store unreachable" toast. Engine-level rule violations (double votes,
//! settled actions, closed challenges) surface as conflicts.

use ecotrace_challenges::ChallengeError;
use ecotrace_registry::RegistryError;
use ecotrace_store::StoreError;
use ecotrace_verification::VerifyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("not signed in")]
    NotAuthenticated,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ClientError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => Self::NotFound(what),
            StoreError::Conflict(what) => Self::Conflict(what),
            StoreError::Unavailable(what) => Self::Unavailable(what),
            StoreError::Serialization(what) | StoreError::Backend(what) => Self::Internal(what),
        }
    }
}

impl From<RegistryError> for ClientError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::MissingTitle
            | RegistryError::MissingEvidence
            | RegistryError::MissingLocation
            | RegistryError::ZeroQuantity => Self::Validation(err.to_string()),
            RegistryError::NotFound(what) => Self::NotFound(what),
            RegistryError::NotAuthor(_)
            | RegistryError::NotPending(_)
            | RegistryError::AlreadyCompleted(_) => Self::Conflict(err.to_string()),
            RegistryError::Store(inner) => inner.into(),
        }
    }
}

impl From<VerifyError> for ClientError {
    fn from(err: VerifyError) -> Self {
        match err {
            VerifyError::NotFound(what) => Self::NotFound(what),
            VerifyError::OwnAction(_)
            | VerifyError::AwaitingCompletion(_)
            | VerifyError::AlreadySettled(_)
            | VerifyError::AlreadyVoted { .. } => Self::Conflict(err.to_string()),
            // Half-applied settlement: the message carries the owed credit.
            VerifyError::CreditFailed { .. } => Self::Internal(err.to_string()),
            VerifyError::Store(inner) => inner.into(),
        }
    }
}

impl From<ChallengeError> for ClientError {
    fn from(err: ChallengeError) -> Self {
        match err {
            ChallengeError::MissingTitle
            | ChallengeError::MissingDistrict
            | ChallengeError::ZeroGoal
            | ChallengeError::InvalidWindow => Self::Validation(err.to_string()),
            ChallengeError::NotFound(what) => Self::NotFound(what),
            ChallengeError::Closed(_) => Self::Conflict(err.to_string()),
            ChallengeError::Store(inner) => inner.into(),
        }
    }
}
