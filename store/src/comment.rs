//! Comment storage trait.

use crate::StoreError;
use feedback_types::{Comment, FeedbackId, NewComment, Timestamp};

pub trait CommentStore {
    /// Comments on an item, oldest first. `NotFound` if the item does not exist.
    fn list_comments(&self, feedback_id: FeedbackId) -> Result<Vec<Comment>, StoreError>;

    /// Append a comment. Comment ids increase across all items.
    fn add_comment(
        &self,
        feedback_id: FeedbackId,
        comment: NewComment,
        now: Timestamp,
    ) -> Result<Comment, StoreError>;
}
