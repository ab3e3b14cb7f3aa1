use ecotrace_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("action {0} not found")]
    NotFound(String),

    #[error("authors cannot vote on their own action ({0})")]
    OwnAction(String),

    #[error("action {0} has no completion evidence yet")]
    AwaitingCompletion(String),

    #[error("action {0} is already settled")]
    AlreadySettled(String),

    #[error("voter {voter} has already voted on action {action}")]
    AlreadyVoted { action: String, voter: String },

    /// The `Pending → Verified` transition committed but crediting the
    /// author failed. The action cannot be re-settled, so the credit must be
    /// reconciled from the logged amounts.
    #[error("action {action} verified but crediting the author failed: {source}")]
    CreditFailed {
        action: String,
        #[source]
        source: StoreError,
    },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
