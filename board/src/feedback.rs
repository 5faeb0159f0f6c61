//! Feedback submission, moderation, voting and comments.

use std::sync::Arc;

use feedback_store::BoardStore;
use feedback_types::{
    Clock, Comment, FeedbackId, FeedbackItem, FeedbackStatus, NewComment, NewFeedback,
    VoteDirection, VoterId,
};
use feedback_votes::VoteEngine;
use tracing::info;

use crate::query::FeedbackQuery;
use crate::{required, BoardError};

pub struct FeedbackService {
    store: Arc<dyn BoardStore>,
    clock: Arc<dyn Clock>,
    votes: VoteEngine<dyn BoardStore>,
}

impl FeedbackService {
    pub fn new(store: Arc<dyn BoardStore>, clock: Arc<dyn Clock>) -> Self {
        let votes = VoteEngine::with_clock(store.clone(), clock.clone());
        Self {
            store,
            clock,
            votes,
        }
    }

    /// Store a new submission. Title and description are trimmed and must
    /// not be blank.
    pub fn submit(&self, submission: NewFeedback) -> Result<FeedbackItem, BoardError> {
        let submission = NewFeedback {
            title: required("title", submission.title)?,
            description: required("description", submission.description)?,
            category: submission.category,
        };
        let item = self.store.insert_item(submission, self.clock.now())?;
        info!(feedback_id = %item.id, category = %item.category, "feedback submitted");
        Ok(item)
    }

    pub fn get(&self, id: FeedbackId) -> Result<FeedbackItem, BoardError> {
        Ok(self.store.fetch_item(id)?)
    }

    pub fn delete(&self, id: FeedbackId) -> Result<(), BoardError> {
        self.store.delete_item(id)?;
        info!(feedback_id = %id, "feedback deleted");
        Ok(())
    }

    pub fn list(&self, query: &FeedbackQuery) -> Result<Vec<FeedbackItem>, BoardError> {
        Ok(query.apply(self.store.list_items()?))
    }

    /// Move an item to `status`. Votes are left as they are, and the edit
    /// is serialized with votes on the same item.
    pub fn update_status(
        &self,
        id: FeedbackId,
        status: FeedbackStatus,
    ) -> Result<FeedbackItem, BoardError> {
        let mut previous = status;
        let saved = self.votes.update_item(id, |item| {
            previous = std::mem::replace(&mut item.status, status);
        })?;
        info!(feedback_id = %id, from = %previous, to = %status, "feedback status changed");
        Ok(saved)
    }

    pub fn vote(
        &self,
        id: FeedbackId,
        voter: &VoterId,
        direction: VoteDirection,
    ) -> Result<FeedbackItem, BoardError> {
        Ok(self.votes.apply_vote(id, voter, direction)?)
    }

    pub fn upvote(&self, id: FeedbackId, voter: &VoterId) -> Result<FeedbackItem, BoardError> {
        self.vote(id, voter, VoteDirection::Up)
    }

    pub fn downvote(&self, id: FeedbackId, voter: &VoterId) -> Result<FeedbackItem, BoardError> {
        self.vote(id, voter, VoteDirection::Down)
    }

    pub fn comments(&self, id: FeedbackId) -> Result<Vec<Comment>, BoardError> {
        Ok(self.store.list_comments(id)?)
    }

    pub fn add_comment(&self, id: FeedbackId, comment: NewComment) -> Result<Comment, BoardError> {
        let comment = NewComment {
            author: comment.author,
            content: required("content", comment.content)?,
        };
        Ok(self.store.add_comment(id, comment, self.clock.now())?)
    }
}
