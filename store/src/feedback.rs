//! Feedback item storage trait.

use crate::StoreError;
use feedback_types::{FeedbackId, FeedbackItem, NewFeedback, Timestamp};

/// Keyed storage of feedback items.
pub trait FeedbackStore {
    /// Fetch an item by id.
    fn fetch_item(&self, id: FeedbackId) -> Result<FeedbackItem, StoreError>;

    /// Replace the stored item with the same id and return what was stored.
    ///
    /// Idempotent. Fails with `NotFound` if the id was never assigned and with
    /// `Corruption` if the record breaks the vote-count invariant.
    fn save_item(&self, item: &FeedbackItem) -> Result<FeedbackItem, StoreError>;

    /// Store a new submission under the next free id (one past the largest
    /// id ever assigned). The item starts in status `new` with no votes.
    fn insert_item(&self, submission: NewFeedback, now: Timestamp)
        -> Result<FeedbackItem, StoreError>;

    /// Remove an item. Comments are left in place.
    fn delete_item(&self, id: FeedbackId) -> Result<(), StoreError>;

    /// All items in ascending id order.
    fn list_items(&self) -> Result<Vec<FeedbackItem>, StoreError>;

    fn contains_item(&self, id: FeedbackId) -> Result<bool, StoreError> {
        match self.fetch_item(id) {
            Ok(_) => Ok(true),
            Err(StoreError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
