//! Fundamental types for the feedback board.
//!
//! This crate defines the records shared across every other crate in the workspace:
//! feedback items and their vote sets, voter identifiers, timestamps, the closed
//! category/status enumerations, comments, roadmap items and changelog entries.

pub mod changelog;
pub mod comment;
pub mod error;
pub mod feedback;
pub mod ids;
pub mod roadmap;
pub mod state;
pub mod time;
pub mod vote;
pub mod voter;

pub use changelog::{ChangelogEntry, ChangelogPatch, NewChangelogEntry};
pub use comment::{Comment, NewComment};
pub use error::TypeError;
pub use feedback::{FeedbackItem, NewFeedback};
pub use ids::{ChangelogId, CommentId, FeedbackId, RoadmapId};
pub use roadmap::{NewRoadmapItem, RoadmapItem, RoadmapPatch};
pub use state::{Category, ChangeKind, FeedbackStatus, RoadmapStatus, Timeline};
pub use time::{Clock, SystemClock, Timestamp};
pub use vote::{VoteDirection, VoteStance};
pub use voter::VoterId;
