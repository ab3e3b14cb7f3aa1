use ecotrace_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("a title is required")]
    MissingTitle,

    #[error("photo evidence is required")]
    MissingEvidence,

    #[error("a geolocation is required to create an action")]
    MissingLocation,

    #[error("quantity must be at least 1")]
    ZeroQuantity,

    #[error("action {0} not found")]
    NotFound(String),

    #[error("only the author may complete action {0}")]
    NotAuthor(String),

    #[error("action {0} is no longer pending")]
    NotPending(String),

    #[error("action {0} already has completion evidence")]
    AlreadyCompleted(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
