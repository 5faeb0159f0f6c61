//! Abstract storage traits for the feedback board.
//!
//! Every storage backend (LMDB, in-memory for testing and development)
//! implements these traits. The rest of the codebase depends only on the
//! traits, usually through a shared `Arc<dyn BoardStore>`.

pub mod changelog;
pub mod comment;
pub mod error;
pub mod feedback;
pub mod roadmap;

pub use changelog::ChangelogStore;
pub use comment::CommentStore;
pub use error::StoreError;
pub use feedback::FeedbackStore;
pub use roadmap::RoadmapStore;

/// Every collection the board persists, behind one handle.
pub trait BoardStore: FeedbackStore + CommentStore + RoadmapStore + ChangelogStore + Send + Sync {}

impl<T> BoardStore for T where
    T: FeedbackStore + CommentStore + RoadmapStore + ChangelogStore + Send + Sync
{
}
