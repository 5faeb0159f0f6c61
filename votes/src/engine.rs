//! Applies vote transitions to stored items.

use std::sync::Arc;

use feedback_store::FeedbackStore;
use feedback_types::{Clock, FeedbackId, FeedbackItem, SystemClock, VoteDirection, VoterId};
use tracing::debug;

use crate::error::VoteError;
use crate::locks::KeyedLocks;
use crate::transition::apply_vote;

/// Applies votes against a [`FeedbackStore`].
///
/// Each call is fetch, transition, save under a lock keyed by the item id,
/// so concurrent votes on one item are serialized instead of racing.
pub struct VoteEngine<S: ?Sized = dyn FeedbackStore + Send + Sync> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    locks: KeyedLocks<FeedbackId>,
}

impl<S: FeedbackStore + ?Sized> VoteEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            locks: KeyedLocks::new(),
        }
    }

    /// Apply `voter`'s vote in `direction` to item `id` and return the stored result.
    pub fn apply_vote(
        &self,
        id: FeedbackId,
        voter: &VoterId,
        direction: VoteDirection,
    ) -> Result<FeedbackItem, VoteError> {
        self.locks.with_lock(id, || {
            let mut item = self
                .store
                .fetch_item(id)
                .map_err(|e| VoteError::for_item(id, e))?;

            let transition = apply_vote(&mut item, voter, direction, self.clock.now());

            let saved = self
                .store
                .save_item(&item)
                .map_err(|e| VoteError::for_item(id, e))?;

            debug!(
                feedback_id = %id,
                voter = %voter,
                direction = %direction,
                kind = ?transition.kind(),
                upvotes = saved.upvotes,
                downvotes = saved.downvotes,
                "vote applied"
            );
            Ok(saved)
        })
    }

    pub fn upvote(&self, id: FeedbackId, voter: &VoterId) -> Result<FeedbackItem, VoteError> {
        self.apply_vote(id, voter, VoteDirection::Up)
    }

    pub fn downvote(&self, id: FeedbackId, voter: &VoterId) -> Result<FeedbackItem, VoteError> {
        self.apply_vote(id, voter, VoteDirection::Down)
    }

    /// Apply a non-vote edit to item `id` under the same lock votes take.
    ///
    /// `updated_at` is stamped from the engine's clock after `edit` runs.
    pub fn update_item(
        &self,
        id: FeedbackId,
        edit: impl FnOnce(&mut FeedbackItem),
    ) -> Result<FeedbackItem, VoteError> {
        self.locks.with_lock(id, || {
            let mut item = self
                .store
                .fetch_item(id)
                .map_err(|e| VoteError::for_item(id, e))?;
            edit(&mut item);
            item.updated_at = self.clock.now();
            self.store
                .save_item(&item)
                .map_err(|e| VoteError::for_item(id, e))
        })
    }
}
