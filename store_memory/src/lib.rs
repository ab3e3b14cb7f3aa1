//! Thread-safe in-memory document store.
//!
//! Implements every `ecotrace-store` trait with the atomicity guarantees the
//! verification protocol requires: vote append + counter increment happen
//! under one lock, and the `Pending → Verified|Rejected` transition is a
//! compare-and-set. Live queries are re-published in full after every
//! mutation, matching the push semantics of the remote store.
//!
//! This backend drives the test suite and local runs; a remote document-store
//! adapter would implement the same traits against its SDK.

mod actions;
mod challenges;
mod users;

use ecotrace_types::{Challenge, ChallengeId, EcoAction, Timestamp, UserId, UserProfile};
use ecotrace_types::ActionId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use tokio::sync::watch;

/// In-memory store with watch-channel live queries and a controllable
/// server clock.
pub struct MemoryStore {
    pub(crate) actions: Mutex<HashMap<ActionId, EcoAction>>,
    pub(crate) users: Mutex<HashMap<UserId, UserProfile>>,
    pub(crate) challenges: Mutex<HashMap<ChallengeId, Challenge>>,
    next_action_id: AtomicU64,
    next_challenge_id: AtomicU64,
    /// Server-assigned timestamps come from here; tests pin and advance it.
    now_secs: AtomicU64,
    /// When set, every operation fails with `StoreError::Unavailable`.
    unavailable: AtomicBool,
    /// When set, only `credit_action` fails, simulating an outage window
    /// that opens mid-settlement.
    credit_unavailable: AtomicBool,
    pub(crate) all_tx: watch::Sender<Vec<EcoAction>>,
    pub(crate) pending_tx: watch::Sender<Vec<EcoAction>>,
}

impl MemoryStore {
    /// A store whose server clock starts at the current system time.
    pub fn new() -> Self {
        Self::with_clock(Timestamp::now().as_secs())
    }

    /// A store with a pinned, deterministic server clock.
    pub fn with_clock(now_secs: u64) -> Self {
        let (all_tx, _) = watch::channel(Vec::new());
        let (pending_tx, _) = watch::channel(Vec::new());
        Self {
            actions: Mutex::new(HashMap::new()),
            users: Mutex::new(HashMap::new()),
            challenges: Mutex::new(HashMap::new()),
            next_action_id: AtomicU64::new(1),
            next_challenge_id: AtomicU64::new(1),
            now_secs: AtomicU64::new(now_secs),
            unavailable: AtomicBool::new(false),
            credit_unavailable: AtomicBool::new(false),
            all_tx,
            pending_tx,
        }
    }

    /// Advance the server clock.
    pub fn advance_clock(&self, secs: u64) {
        self.now_secs.fetch_add(secs, Ordering::SeqCst);
    }

    /// The store's current server time.
    pub fn server_now(&self) -> Timestamp {
        Timestamp::new(self.now_secs.load(Ordering::SeqCst))
    }

    /// Simulate a backend outage: while set, every operation fails with
    /// `StoreError::Unavailable`.
    pub fn set_unavailable(&self, down: bool) {
        self.unavailable.store(down, Ordering::SeqCst);
    }

    /// Fail only `credit_action` while set. Lets tests open an outage window
    /// between the settlement compare-and-set and the author credit.
    pub fn set_credit_unavailable(&self, down: bool) {
        self.credit_unavailable.store(down, Ordering::SeqCst);
    }

    pub(crate) fn check_credit_available(&self) -> Result<(), ecotrace_store::StoreError> {
        if self.credit_unavailable.load(Ordering::SeqCst) {
            Err(ecotrace_store::StoreError::Unavailable(
                "simulated outage".into(),
            ))
        } else {
            Ok(())
        }
    }

    pub(crate) fn check_available(&self) -> Result<(), ecotrace_store::StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(ecotrace_store::StoreError::Unavailable(
                "simulated outage".into(),
            ))
        } else {
            Ok(())
        }
    }

    pub(crate) fn next_action_id(&self) -> ActionId {
        let n = self.next_action_id.fetch_add(1, Ordering::SeqCst);
        ActionId::new(format!("action-{n}"))
    }

    pub(crate) fn next_challenge_id(&self) -> ChallengeId {
        let n = self.next_challenge_id.fetch_add(1, Ordering::SeqCst);
        ChallengeId::new(format!("challenge-{n}"))
    }

    /// Re-publish both action snapshots. Called with the actions lock held so
    /// subscribers observe each mutation exactly once, in order.
    pub(crate) fn publish_actions(&self, map: &HashMap<ActionId, EcoAction>) {
        let mut all: Vec<EcoAction> = map.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        let pending: Vec<EcoAction> = all
            .iter()
            .filter(|a| a.status == ecotrace_types::ActionStatus::Pending)
            .cloned()
            .collect();
        // send_replace never fails; snapshots are retained for late subscribers.
        self.all_tx.send_replace(all);
        self.pending_tx.send_replace(pending);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
