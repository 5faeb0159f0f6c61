//! Discussion comments attached to feedback items.

use serde::{Deserialize, Serialize};

use crate::{CommentId, FeedbackId, Timestamp};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub feedback_id: FeedbackId,
    pub author: String,
    pub content: String,
    pub created_at: Timestamp,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    /// Display name; blank or missing means anonymous.
    #[serde(default)]
    pub author: Option<String>,
    pub content: String,
}

impl NewComment {
    pub const ANONYMOUS: &'static str = "Anonymous User";

    /// The author name to record.
    pub fn author_or_anonymous(&self) -> String {
        self.author
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(Self::ANONYMOUS)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_author_is_anonymous() {
        let c = NewComment {
            author: Some("  ".to_string()),
            content: "hi".to_string(),
        };
        assert_eq!(c.author_or_anonymous(), NewComment::ANONYMOUS);
    }

    #[test]
    fn named_author_is_trimmed() {
        let c = NewComment {
            author: Some(" Erin ".to_string()),
            content: "hi".to_string(),
        };
        assert_eq!(c.author_or_anonymous(), "Erin");
    }
}
