//! Optimistic voting against a local copy, with a compensating rollback.
//!
//! The caller applies the vote locally, attempts the remote commit, and on
//! failure reapplies the inverse transition. This is a compensating action,
//! not a two-phase commit: the remote side is never asked to undo anything.

use feedback_types::{FeedbackItem, Timestamp, VoteDirection, VoterId};

use crate::transition::{apply_vote, restore_stance, VoteTransition};

/// A vote applied to a local copy that has not been confirmed yet.
#[must_use = "an optimistic vote must be committed or rolled back"]
#[derive(Debug)]
pub struct OptimisticVote {
    transition: VoteTransition,
    previous_updated_at: Timestamp,
}

impl OptimisticVote {
    /// Apply the vote to `local` and remember how to undo it.
    pub fn apply(
        local: &mut FeedbackItem,
        voter: &VoterId,
        direction: VoteDirection,
        now: Timestamp,
    ) -> Self {
        let previous_updated_at = local.updated_at;
        let transition = apply_vote(local, voter, direction, now);
        Self {
            transition,
            previous_updated_at,
        }
    }

    pub fn transition(&self) -> &VoteTransition {
        &self.transition
    }

    /// Restore `local` to exactly its state before [`OptimisticVote::apply`].
    pub fn rollback(self, local: &mut FeedbackItem) {
        restore_stance(
            local,
            &self.transition.voter,
            self.transition.before,
            self.previous_updated_at,
        );
    }

    /// Keep the local change.
    pub fn commit(self) -> VoteTransition {
        self.transition
    }
}

/// Apply a vote to `local`, then run `remote` with the optimistic state.
///
/// On success `local` is replaced by the record the remote side returned.
/// On failure the vote is rolled back and the remote error is returned as is.
pub fn apply_optimistically<E>(
    local: &mut FeedbackItem,
    voter: &VoterId,
    direction: VoteDirection,
    now: Timestamp,
    remote: impl FnOnce(&FeedbackItem) -> Result<FeedbackItem, E>,
) -> Result<VoteTransition, E> {
    let pending = OptimisticVote::apply(local, voter, direction, now);
    match remote(local) {
        Ok(confirmed) => {
            *local = confirmed;
            Ok(pending.commit())
        }
        Err(e) => {
            pending.rollback(local);
            Err(e)
        }
    }
}
