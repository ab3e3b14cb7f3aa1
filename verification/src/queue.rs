//! Per-viewer verification queue read-model.
//!
//! Pure snapshot shaping: feed it the current pending-action result set (from
//! the live query or a one-shot read) and the viewing user, get back the
//! queue entries to render. Testable with synthetic snapshots.

use ecotrace_types::action::Evidence;
use ecotrace_types::{ActionStatus, EcoAction, UserId};

/// One action as shown in the verification queue.
#[derive(Clone, Debug)]
pub struct QueueEntry {
    pub action: EcoAction,
    /// Whether the viewer may still cast a vote: completion evidence is
    /// present and the viewer has not voted yet.
    pub can_vote: bool,
}

impl QueueEntry {
    /// Both evidence items for side-by-side display, once the action is
    /// completed. Uncompleted actions are shown but not votable.
    pub fn evidence_pair(&self) -> Option<(&Evidence, &Evidence)> {
        self.action
            .evidence_after
            .as_ref()
            .map(|after| (&self.action.evidence_before, after))
    }
}

/// Shape a snapshot into the viewer's queue.
///
/// Queue-eligible: `status == Pending` and not the viewer's own action. The
/// snapshot normally arrives pre-filtered to pending (the server-side half of
/// the predicate); the status check here keeps the combined predicate intact
/// for arbitrary snapshots.
pub fn build_queue(snapshot: &[EcoAction], viewer: &UserId) -> Vec<QueueEntry> {
    snapshot
        .iter()
        .filter(|a| a.status == ActionStatus::Pending)
        .filter(|a| &a.author_id != viewer)
        .map(|a| QueueEntry {
            can_vote: a.is_completed() && !a.has_voted(viewer),
            action: a.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecotrace_types::{ActionId, ActionType, Timestamp, Vote};

    fn action(id: &str, author: &str, status: ActionStatus, completed: bool) -> EcoAction {
        EcoAction {
            id: ActionId::new(id),
            author_id: UserId::new(author),
            author_name: author.to_string(),
            author_photo: None,
            title: "Park cleanup".into(),
            description: String::new(),
            action_type: ActionType::Cleanup,
            quantity: 1,
            co2_impact: 2.0,
            eco_points: 30,
            status,
            evidence_before: Evidence::new("before.jpg"),
            evidence_after: completed.then(|| Evidence::new("after.jpg")),
            completion_comment: None,
            location: None,
            votes: Vec::new(),
            vote_count: 0,
            created_at: Timestamp::new(1_000),
            completed_at: completed.then(|| Timestamp::new(1_100)),
        }
    }

    #[test]
    fn excludes_own_and_settled_actions() {
        let snapshot = vec![
            action("a1", "author", ActionStatus::Pending, true),
            action("a2", "viewer", ActionStatus::Pending, true),
            action("a3", "author", ActionStatus::Verified, true),
            action("a4", "author", ActionStatus::Rejected, true),
        ];
        let queue = build_queue(&snapshot, &UserId::new("viewer"));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].action.id, ActionId::new("a1"));
        assert!(queue[0].can_vote);
    }

    #[test]
    fn uncompleted_actions_are_visible_but_not_votable() {
        let snapshot = vec![action("a1", "author", ActionStatus::Pending, false)];
        let queue = build_queue(&snapshot, &UserId::new("viewer"));
        assert_eq!(queue.len(), 1);
        assert!(!queue[0].can_vote);
        assert!(queue[0].evidence_pair().is_none());
    }

    #[test]
    fn prior_vote_disables_voting_but_keeps_the_entry() {
        let mut voted = action("a1", "author", ActionStatus::Pending, true);
        voted.votes.push(Vote {
            voter_id: UserId::new("viewer"),
            approve: true,
            cast_at: Timestamp::new(1_200),
        });
        voted.vote_count = 1;

        let queue = build_queue(&[voted], &UserId::new("viewer"));
        assert_eq!(queue.len(), 1);
        assert!(!queue[0].can_vote);
        let (before, after) = queue[0].evidence_pair().unwrap();
        assert_eq!(before.as_str(), "before.jpg");
        assert_eq!(after.as_str(), "after.jpg");
    }
}
