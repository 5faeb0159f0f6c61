//! Board services for the feedback board.
//!
//! [`Board`] bundles the three services over one shared [`BoardStore`] and
//! one clock. Services validate input, stamp times and delegate voting to
//! [`feedback_votes::VoteEngine`].

pub mod changelog;
pub mod error;
pub mod feedback;
pub mod query;
pub mod roadmap;

use std::sync::Arc;

use feedback_store::BoardStore;
use feedback_types::{Clock, SystemClock};

pub use changelog::ChangelogService;
pub use error::BoardError;
pub use feedback::FeedbackService;
pub use query::{FeedbackQuery, SortOrder, StatusFilter};
pub use roadmap::{RoadmapBoard, RoadmapService};

/// All board services sharing one store.
pub struct Board {
    pub feedback: FeedbackService,
    pub roadmap: RoadmapService,
    pub changelog: ChangelogService,
}

impl Board {
    pub fn new(store: Arc<dyn BoardStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn BoardStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            feedback: FeedbackService::new(store.clone(), clock.clone()),
            roadmap: RoadmapService::new(store.clone()),
            changelog: ChangelogService::new(store, clock),
        }
    }
}

/// Trim `value` and reject it if nothing is left.
pub(crate) fn required(field: &str, value: String) -> Result<String, BoardError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BoardError::Validation(format!("{field} must not be blank")));
    }
    if trimmed.len() == value.len() {
        Ok(value)
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims_and_rejects_blank() {
        assert_eq!(required("title", "  Dark mode ".to_string()).unwrap(), "Dark mode");
        assert!(matches!(
            required("title", " \t".to_string()),
            Err(BoardError::Validation(msg)) if msg == "title must not be blank"
        ));
    }
}
