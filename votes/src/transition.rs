//! The toggle-with-exclusion vote transition.

use feedback_types::{FeedbackItem, Timestamp, VoteDirection, VoteStance, VoterId};

/// How a vote changed the voter's stance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    /// unvoted -> up/down
    Cast,
    /// up -> unvoted or down -> unvoted
    Retract,
    /// up -> down or down -> up
    Switch,
}

/// Record of a single vote applied to an item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteTransition {
    pub voter: VoterId,
    pub direction: VoteDirection,
    pub before: VoteStance,
    pub after: VoteStance,
}

impl VoteTransition {
    pub fn kind(&self) -> TransitionKind {
        match (self.before, self.after) {
            (VoteStance::Unvoted, _) => TransitionKind::Cast,
            (_, VoteStance::Unvoted) => TransitionKind::Retract,
            _ => TransitionKind::Switch,
        }
    }

    /// Change in `upvotes - downvotes` caused by this vote.
    pub fn score_delta(&self) -> i64 {
        self.after.score() - self.before.score()
    }
}

/// Apply `voter`'s vote in `direction` to `item`.
///
/// Already holding that direction retracts it. Otherwise the vote is added
/// and any vote in the opposite direction is removed in the same step.
/// `updated_at` is set to `now` in every case.
pub fn apply_vote(
    item: &mut FeedbackItem,
    voter: &VoterId,
    direction: VoteDirection,
    now: Timestamp,
) -> VoteTransition {
    let before = item.stance_of(voter);

    if item.voters(direction).contains(voter) {
        remove_vote(item, voter, direction);
    } else {
        add_vote(item, voter, direction);
        remove_vote(item, voter, direction.opposite());
    }
    item.updated_at = now;

    VoteTransition {
        voter: voter.clone(),
        direction,
        before,
        after: item.stance_of(voter),
    }
}

/// Force `voter` into `stance`, keeping counters in step with the sets.
///
/// Used to undo a transition: restoring `transition.before` is its exact inverse.
pub fn restore_stance(item: &mut FeedbackItem, voter: &VoterId, stance: VoteStance, now: Timestamp) {
    remove_vote(item, voter, VoteDirection::Up);
    remove_vote(item, voter, VoteDirection::Down);
    if let Some(direction) = stance.direction() {
        add_vote(item, voter, direction);
    }
    item.updated_at = now;
}

fn add_vote(item: &mut FeedbackItem, voter: &VoterId, direction: VoteDirection) {
    let (set, counter) = item.tally_mut(direction);
    if set.insert(voter.clone()) {
        *counter += 1;
    }
}

fn remove_vote(item: &mut FeedbackItem, voter: &VoterId, direction: VoteDirection) {
    let (set, counter) = item.tally_mut(direction);
    if set.remove(voter) {
        *counter = counter.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedback_types::{Category, FeedbackId, NewFeedback};

    fn voter(name: &str) -> VoterId {
        VoterId::parse(name).unwrap()
    }

    fn fresh() -> FeedbackItem {
        FeedbackItem::new(
            FeedbackId::new(1),
            NewFeedback {
                title: "Keyboard shortcuts".to_string(),
                description: "Add j/k navigation".to_string(),
                category: Category::Feature,
            },
            Timestamp::new(10),
        )
    }

    #[test]
    fn first_upvote_is_cast() {
        let mut item = fresh();
        let t = apply_vote(&mut item, &voter("alice"), VoteDirection::Up, Timestamp::new(11));
        assert_eq!(item.upvotes, 1);
        assert!(item.upvoted_by.contains(&voter("alice")));
        assert_eq!(t.kind(), TransitionKind::Cast);
        assert_eq!(t.score_delta(), 1);
        assert_eq!(item.updated_at, Timestamp::new(11));
    }

    #[test]
    fn repeat_upvote_retracts() {
        let mut item = fresh();
        apply_vote(&mut item, &voter("alice"), VoteDirection::Up, Timestamp::new(11));
        let t = apply_vote(&mut item, &voter("alice"), VoteDirection::Up, Timestamp::new(12));
        assert_eq!(item.upvotes, 0);
        assert!(item.upvoted_by.is_empty());
        assert_eq!(t.kind(), TransitionKind::Retract);
        assert_eq!(t.after, VoteStance::Unvoted);
    }

    #[test]
    fn downvote_after_upvote_switches() {
        let mut item = fresh();
        apply_vote(&mut item, &voter("alice"), VoteDirection::Up, Timestamp::new(11));
        let t = apply_vote(&mut item, &voter("alice"), VoteDirection::Down, Timestamp::new(12));
        assert_eq!((item.upvotes, item.downvotes), (0, 1));
        assert!(item.upvoted_by.is_empty());
        assert!(item.downvoted_by.contains(&voter("alice")));
        assert_eq!(t.kind(), TransitionKind::Switch);
        assert_eq!(t.score_delta(), -2);
    }

    #[test]
    fn other_voters_are_untouched() {
        let mut item = fresh();
        apply_vote(&mut item, &voter("bob"), VoteDirection::Down, Timestamp::new(11));
        apply_vote(&mut item, &voter("alice"), VoteDirection::Up, Timestamp::new(12));
        apply_vote(&mut item, &voter("alice"), VoteDirection::Down, Timestamp::new(13));
        assert_eq!(item.downvotes, 2);
        assert_eq!(item.stance_of(&voter("bob")), VoteStance::Downvoted);
        assert!(item.check_invariants().is_ok());
    }

    #[test]
    fn restore_undoes_switch() {
        let mut item = fresh();
        apply_vote(&mut item, &voter("alice"), VoteDirection::Up, Timestamp::new(11));
        let snapshot = item.clone();
        let t = apply_vote(&mut item, &voter("alice"), VoteDirection::Down, Timestamp::new(12));
        restore_stance(&mut item, &t.voter, t.before, snapshot.updated_at);
        assert_eq!(item, snapshot);
    }
}
