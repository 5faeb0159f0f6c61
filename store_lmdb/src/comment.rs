//! LMDB implementation of CommentStore.
//!
//! Key format: `feedback_id (8 bytes BE) ++ comment_id (8 bytes BE)`, so a
//! range scan over one feedback id returns its comments oldest first.

use feedback_store::{CommentStore, StoreError};
use feedback_types::{Comment, CommentId, FeedbackId, NewComment, Timestamp};

use crate::environment::{LmdbEnvironment, LAST_COMMENT_ID};
use crate::LmdbError;

fn comment_key(feedback_id: FeedbackId, comment_id: u64) -> [u8; 16] {
    let mut key = [0u8; 16];
    key[..8].copy_from_slice(&feedback_id.to_be_bytes());
    key[8..].copy_from_slice(&comment_id.to_be_bytes());
    key
}

impl LmdbEnvironment {
    fn require_item(&self, feedback_id: FeedbackId) -> Result<(), StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let exists = self
            .feedback_db
            .get(&rtxn, &feedback_id.to_be_bytes())
            .map_err(LmdbError::from)?
            .is_some();
        if exists {
            Ok(())
        } else {
            Err(StoreError::NotFound(format!("feedback {feedback_id}")))
        }
    }
}

impl CommentStore for LmdbEnvironment {
    fn list_comments(&self, feedback_id: FeedbackId) -> Result<Vec<Comment>, StoreError> {
        self.require_item(feedback_id)?;
        let low = comment_key(feedback_id, 0);
        let high = comment_key(feedback_id, u64::MAX);
        Ok(self.range_records(&self.comments_db, &low, &high)?)
    }

    fn add_comment(
        &self,
        feedback_id: FeedbackId,
        comment: NewComment,
        now: Timestamp,
    ) -> Result<Comment, StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        if self
            .feedback_db
            .get(&wtxn, &feedback_id.to_be_bytes())
            .map_err(LmdbError::from)?
            .is_none()
        {
            return Err(StoreError::NotFound(format!("feedback {feedback_id}")));
        }
        let id = self.next_id(&mut wtxn, LAST_COMMENT_ID)?;
        let stored = Comment {
            id: CommentId::new(id),
            feedback_id,
            author: comment.author_or_anonymous(),
            content: comment.content,
            created_at: now,
        };
        let bytes = bincode::serialize(&stored).map_err(LmdbError::from)?;
        self.comments_db
            .put(&mut wtxn, &comment_key(feedback_id, id), &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::open_test_env;
    use feedback_store::FeedbackStore;
    use feedback_types::{Category, NewFeedback};

    fn new_item(env: &LmdbEnvironment) -> FeedbackId {
        env.insert_item(
            NewFeedback {
                title: "t".to_string(),
                description: "d".to_string(),
                category: Category::Feature,
            },
            Timestamp::new(1),
        )
        .unwrap()
        .id
    }

    fn say(text: &str) -> NewComment {
        NewComment {
            author: Some("Mo".to_string()),
            content: text.to_string(),
        }
    }

    #[test]
    fn comments_are_scoped_to_their_item() {
        let (_dir, env) = open_test_env();
        let a = new_item(&env);
        let b = new_item(&env);
        env.add_comment(a, say("a1"), Timestamp::new(2)).unwrap();
        env.add_comment(b, say("b1"), Timestamp::new(3)).unwrap();
        env.add_comment(a, say("a2"), Timestamp::new(4)).unwrap();

        let texts: Vec<String> = env
            .list_comments(a)
            .unwrap()
            .into_iter()
            .map(|c| c.content)
            .collect();
        assert_eq!(texts, ["a1", "a2"]);
        assert_eq!(env.list_comments(b).unwrap().len(), 1);
    }

    #[test]
    fn comment_on_missing_item_is_not_found() {
        let (_dir, env) = open_test_env();
        assert!(matches!(
            env.add_comment(FeedbackId::new(9), say("?"), Timestamp::new(1)),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            env.list_comments(FeedbackId::new(9)),
            Err(StoreError::NotFound(_))
        ));
    }
}
