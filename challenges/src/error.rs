use ecotrace_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChallengeError {
    #[error("a title is required")]
    MissingTitle,

    #[error("a district is required")]
    MissingDistrict,

    #[error("goal must be at least 1")]
    ZeroGoal,

    #[error("end date must be after the start date")]
    InvalidWindow,

    #[error("challenge {0} not found")]
    NotFound(String),

    #[error("challenge {0} is closed")]
    Closed(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
