use feedback_store::StoreError;
use feedback_types::FeedbackId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoteError {
    #[error("feedback {0} not found")]
    NotFound(FeedbackId),

    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

impl VoteError {
    /// Attribute a store `NotFound` to the item being voted on.
    pub(crate) fn for_item(id: FeedbackId, err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => VoteError::NotFound(id),
            other => VoteError::Store(other),
        }
    }
}
