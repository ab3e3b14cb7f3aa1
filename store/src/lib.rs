//! Abstract document-store traits for the ecotrace client.
//!
//! The backing store is a schemaless, multi-collection remote database with
//! per-document atomic field updates and push-based live queries. Every
//! backend (the in-memory store for tests and local runs, a remote adapter in
//! a real deployment) implements these traits; the engines depend only on the
//! traits.
//!
//! The store is the only shared mutable resource between clients and the only
//! synchronization point: the concurrency-bearing operations
//! ([`actions::ActionStore::append_vote`] and
//! [`actions::ActionStore::settle_if_pending`]) are required to be atomic.

pub mod actions;
pub mod challenges;
pub mod error;
pub mod live;
pub mod users;

pub use actions::{ActionStore, NewAction};
pub use challenges::{ChallengeFilter, ChallengeStore, NewChallenge};
pub use error::StoreError;
pub use live::LiveQuery;
pub use users::UserStore;
