use feedback_store::StoreError;
use feedback_votes::VoteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Vote(VoteError),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for BoardError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(what) => BoardError::NotFound(what),
            other => BoardError::Store(other),
        }
    }
}

impl From<VoteError> for BoardError {
    fn from(e: VoteError) -> Self {
        match e {
            VoteError::NotFound(id) => BoardError::NotFound(format!("feedback {id}")),
            other => BoardError::Vote(other),
        }
    }
}
