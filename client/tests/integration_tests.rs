//! End-to-end tests: several clients, one shared store, the full
//! submit → complete → verify → credit lifecycle.

use ecotrace_challenges::ChallengeDraft;
use ecotrace_client::{ClientConfig, EcoClient};
use ecotrace_client::ClientError;
use ecotrace_nullables::{NullClock, NullIdentity};
use ecotrace_registry::ActionDraft;
use ecotrace_store::{ChallengeFilter, UserStore};
use ecotrace_store_memory::MemoryStore;
use ecotrace_types::action::Evidence;
use ecotrace_types::{ActionStatus, ActionType, District, GeoPoint, Timestamp, UserId, UserProfile};
use ecotrace_verification::VerifyOutcome;
use std::sync::Arc;

/// One signed-in session over the shared store, with a frozen clock.
fn session(store: &Arc<MemoryStore>, user: &str) -> EcoClient<MemoryStore, NullIdentity> {
    EcoClient::with_clock(
        Arc::new(NullIdentity::signed_in(user, user)),
        Arc::clone(store),
        ClientConfig::default(),
        Arc::new(NullClock::new(1_000)),
    )
}

fn cleanup_draft() -> ActionDraft {
    ActionDraft {
        title: "Park cleanup".into(),
        description: "two bags of litter".into(),
        action_type: ActionType::Cleanup,
        quantity: 2,
        evidence_before: Evidence::new("before.jpg"),
        location: Some(GeoPoint::new(43.2220, 76.8512)),
    }
}

#[tokio::test]
async fn signed_out_sessions_are_prompted_to_sign_in() {
    let store = Arc::new(MemoryStore::with_clock(1_000));
    let client = EcoClient::with_clock(
        Arc::new(NullIdentity::signed_out()),
        Arc::clone(&store),
        ClientConfig::default(),
        Arc::new(NullClock::new(1_000)),
    );

    assert!(matches!(
        client.sign_in_profile().await,
        Err(ClientError::NotAuthenticated)
    ));
    assert!(matches!(
        client.submit_action(cleanup_draft()).await,
        Err(ClientError::NotAuthenticated)
    ));
    assert!(matches!(
        client.verification_queue().await,
        Err(ClientError::NotAuthenticated)
    ));
}

#[tokio::test]
async fn sign_out_takes_effect_on_the_next_operation() {
    let store = Arc::new(MemoryStore::with_clock(1_000));
    let identity = Arc::new(NullIdentity::signed_in("alice", "alice"));
    let client = EcoClient::with_clock(
        Arc::clone(&identity),
        Arc::clone(&store),
        ClientConfig::default(),
        Arc::new(NullClock::new(1_000)),
    );
    client.sign_in_profile().await.unwrap();

    identity.sign_out();
    assert!(matches!(
        client.submit_action(cleanup_draft()).await,
        Err(ClientError::NotAuthenticated)
    ));

    identity.sign_in(ecotrace_types::CurrentUser {
        id: UserId::new("alice"),
        display_name: "alice".into(),
        photo_url: None,
    });
    assert!(client.submit_action(cleanup_draft()).await.is_ok());
}

#[tokio::test]
async fn first_sign_in_bootstraps_a_profile_once() {
    let store = Arc::new(MemoryStore::with_clock(1_000));
    let alice = session(&store, "alice");

    let profile = alice.sign_in_profile().await.unwrap();
    assert_eq!(profile.trust_score, UserProfile::INITIAL_TRUST);
    assert_eq!(profile.district, District::new("unassigned"));

    store.add_trust(&UserId::new("alice"), 4).await.unwrap();
    let again = alice.sign_in_profile().await.unwrap();
    assert_eq!(again.trust_score, UserProfile::INITIAL_TRUST + 4);
    assert_eq!(again.joined_at, Timestamp::new(1_000));
}

#[tokio::test]
async fn full_lifecycle_submits_verifies_and_credits_exactly_once() {
    let store = Arc::new(MemoryStore::with_clock(1_000));
    let alice = session(&store, "alice");
    let bob = session(&store, "bob");
    let carol = session(&store, "carol");
    let dave = session(&store, "dave");
    for client in [&alice, &bob, &carol, &dave] {
        client.sign_in_profile().await.unwrap();
    }

    let action = alice.submit_action(cleanup_draft()).await.unwrap();
    assert_eq!(action.status, ActionStatus::Pending);
    assert_eq!(action.co2_impact, 4.0);
    assert_eq!(action.eco_points, 30);

    // Not votable until after-evidence lands.
    assert!(matches!(
        bob.verify_action(&action.id, true).await,
        Err(ClientError::Conflict(_))
    ));
    alice
        .complete_action(&action.id, Evidence::new("after.jpg"), Some("done".into()))
        .await
        .unwrap();

    assert_eq!(
        bob.verify_action(&action.id, true).await.unwrap(),
        VerifyOutcome::Recorded { vote_count: 1 }
    );
    assert_eq!(
        carol.verify_action(&action.id, true).await.unwrap(),
        VerifyOutcome::Recorded { vote_count: 2 }
    );
    assert_eq!(
        dave.verify_action(&action.id, false).await.unwrap(),
        VerifyOutcome::Settled {
            status: ActionStatus::Verified
        }
    );

    // The author was credited exactly once; the voters earned trust.
    let dashboard = alice.dashboard().await.unwrap();
    assert_eq!(dashboard.profile.eco_points, 30);
    assert_eq!(dashboard.profile.co2_saved, 4.0);
    assert_eq!(dashboard.profile.total_actions, 1);
    assert_eq!(dashboard.recent_actions.len(), 1);
    assert_eq!(dashboard.recent_actions[0].status, ActionStatus::Verified);

    let voter = bob.sign_in_profile().await.unwrap();
    assert_eq!(voter.trust_score, UserProfile::INITIAL_TRUST + 2);

    let stats = alice.community_stats().await.unwrap();
    assert_eq!(stats.total_actions, 1);
    assert_eq!(stats.verified_actions, 1);
    assert_eq!(stats.co2_saved, 4.0);
}

#[tokio::test]
async fn queue_hides_own_actions_and_marks_votability() {
    let store = Arc::new(MemoryStore::with_clock(1_000));
    let alice = session(&store, "alice");
    let bob = session(&store, "bob");
    alice.sign_in_profile().await.unwrap();
    bob.sign_in_profile().await.unwrap();

    let completed = alice.submit_action(cleanup_draft()).await.unwrap();
    alice
        .complete_action(&completed.id, Evidence::new("after.jpg"), None)
        .await
        .unwrap();
    let uncompleted = alice.submit_action(cleanup_draft()).await.unwrap();

    // The author sees nothing of their own.
    assert!(alice.verification_queue().await.unwrap().is_empty());

    // A peer sees both pending actions but can only vote on the completed one.
    let queue = bob.verification_queue().await.unwrap();
    assert_eq!(queue.len(), 2);
    for entry in &queue {
        if entry.action.id == completed.id {
            assert!(entry.can_vote);
        } else {
            assert_eq!(entry.action.id, uncompleted.id);
            assert!(!entry.can_vote);
        }
    }

    // Voting flips the entry to non-votable for that viewer.
    bob.verify_action(&completed.id, true).await.unwrap();
    let queue = bob.verification_queue().await.unwrap();
    let entry = queue
        .iter()
        .find(|e| e.action.id == completed.id)
        .unwrap();
    assert!(!entry.can_vote);
}

#[tokio::test]
async fn live_queue_subscription_tracks_settlement() {
    let store = Arc::new(MemoryStore::with_clock(1_000));
    let alice = session(&store, "alice");
    let voters = [
        session(&store, "bob"),
        session(&store, "carol"),
        session(&store, "dave"),
    ];
    alice.sign_in_profile().await.unwrap();
    for v in &voters {
        v.sign_in_profile().await.unwrap();
    }

    let live = alice.subscribe_queue();
    let action = alice.submit_action(cleanup_draft()).await.unwrap();
    alice
        .complete_action(&action.id, Evidence::new("after.jpg"), None)
        .await
        .unwrap();
    assert_eq!(live.current().len(), 1);

    for v in &voters {
        v.verify_action(&action.id, true).await.unwrap();
    }
    // Settled actions leave the pending feed but stay in the full feed.
    assert!(live.current().is_empty());
    assert_eq!(alice.subscribe_actions().current().len(), 1);
}

#[tokio::test]
async fn store_outage_is_surfaced_and_recoverable() {
    let store = Arc::new(MemoryStore::with_clock(1_000));
    let alice = session(&store, "alice");
    alice.sign_in_profile().await.unwrap();

    store.set_unavailable(true);
    assert!(matches!(
        alice.submit_action(cleanup_draft()).await,
        Err(ClientError::Unavailable(_))
    ));
    assert!(matches!(
        alice.dashboard().await,
        Err(ClientError::Unavailable(_))
    ));

    // The client object survives the outage; the next attempt just works.
    store.set_unavailable(false);
    assert!(alice.submit_action(cleanup_draft()).await.is_ok());
}

#[tokio::test]
async fn challenge_flow_creates_joins_and_filters() {
    let store = Arc::new(MemoryStore::with_clock(1_000));
    let admin = session(&store, "admin");
    let bob = session(&store, "bob");
    admin.sign_in_profile().await.unwrap();
    bob.sign_in_profile().await.unwrap();

    let challenge = admin
        .create_challenge(ChallengeDraft {
            title: "Plant 100 trees".into(),
            description: "district tree drive".into(),
            district: District::new("north"),
            action_type: Some(ActionType::Tree),
            goal: 100,
            unit: "trees".into(),
            reward: None,
            start_at: Timestamp::new(500),
            end_at: Timestamp::new(500 + 30 * 86_400),
        })
        .await
        .unwrap();

    assert!(bob.join_challenge(&challenge.id).await.unwrap());
    assert!(!bob.join_challenge(&challenge.id).await.unwrap());

    let north = bob
        .challenges(&ChallengeFilter {
            district: Some(District::new("north")),
            ..ChallengeFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(north.len(), 1);
    assert_eq!(north[0].participant_count, 1);

    let south = bob
        .challenges(&ChallengeFilter {
            district: Some(District::new("south")),
            ..ChallengeFilter::default()
        })
        .await
        .unwrap();
    assert!(south.is_empty());
}

#[tokio::test]
async fn validation_failures_map_to_the_validation_surface() {
    let store = Arc::new(MemoryStore::with_clock(1_000));
    let alice = session(&store, "alice");
    alice.sign_in_profile().await.unwrap();

    let missing_location = ActionDraft {
        location: None,
        ..cleanup_draft()
    };
    assert!(matches!(
        alice.submit_action(missing_location).await,
        Err(ClientError::Validation(_))
    ));

    // Self-votes are conflicts, not validation failures.
    let action = alice.submit_action(cleanup_draft()).await.unwrap();
    alice
        .complete_action(&action.id, Evidence::new("after.jpg"), None)
        .await
        .unwrap();
    assert!(matches!(
        alice.verify_action(&action.id, true).await,
        Err(ClientError::Conflict(_))
    ));
}
