//! Feedback items and their vote membership sets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::{
    Category, FeedbackId, FeedbackStatus, Timestamp, TypeError, VoteDirection, VoteStance,
    VoterId,
};

/// A submitted piece of feedback.
///
/// `upvotes == upvoted_by.len()` and `downvotes == downvoted_by.len()` hold
/// for every stored record, and no voter is in both sets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackItem {
    pub id: FeedbackId,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub status: FeedbackStatus,
    pub upvotes: u32,
    pub downvotes: u32,
    pub upvoted_by: BTreeSet<VoterId>,
    pub downvoted_by: BTreeSet<VoterId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields supplied by the submitter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFeedback {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub category: Category,
}

impl FeedbackItem {
    /// Build a freshly submitted item: status `new`, no votes.
    pub fn new(id: FeedbackId, submission: NewFeedback, now: Timestamp) -> Self {
        Self {
            id,
            title: submission.title,
            description: submission.description,
            category: submission.category,
            status: FeedbackStatus::New,
            upvotes: 0,
            downvotes: 0,
            upvoted_by: BTreeSet::new(),
            downvoted_by: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn stance_of(&self, voter: &VoterId) -> VoteStance {
        if self.upvoted_by.contains(voter) {
            VoteStance::Upvoted
        } else if self.downvoted_by.contains(voter) {
            VoteStance::Downvoted
        } else {
            VoteStance::Unvoted
        }
    }

    /// Net score, `upvotes - downvotes`.
    pub fn score(&self) -> i64 {
        i64::from(self.upvotes) - i64::from(self.downvotes)
    }

    pub fn voters(&self, direction: VoteDirection) -> &BTreeSet<VoterId> {
        match direction {
            VoteDirection::Up => &self.upvoted_by,
            VoteDirection::Down => &self.downvoted_by,
        }
    }

    /// Membership set and its counter for one direction.
    pub fn tally_mut(&mut self, direction: VoteDirection) -> (&mut BTreeSet<VoterId>, &mut u32) {
        match direction {
            VoteDirection::Up => (&mut self.upvoted_by, &mut self.upvotes),
            VoteDirection::Down => (&mut self.downvoted_by, &mut self.downvotes),
        }
    }

    /// Verify that counters match their sets and the sets are disjoint.
    pub fn check_invariants(&self) -> Result<(), TypeError> {
        for (side, counter, members) in [
            ("upvote", self.upvotes, self.upvoted_by.len()),
            ("downvote", self.downvotes, self.downvoted_by.len()),
        ] {
            if counter as usize != members {
                return Err(TypeError::CounterMismatch {
                    side,
                    counter,
                    members,
                });
            }
        }
        if let Some(voter) = self.upvoted_by.intersection(&self.downvoted_by).next() {
            return Err(TypeError::OverlappingVote(voter.to_string()));
        }
        Ok(())
    }
}
