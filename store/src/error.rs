use feedback_types::TypeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("record is corrupted: {0}")]
    Corruption(String),
}

impl From<TypeError> for StoreError {
    fn from(e: TypeError) -> Self {
        StoreError::Corruption(e.to_string())
    }
}
