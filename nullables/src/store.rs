//! Thread-safe in-memory storage of every board collection.

use feedback_store::{ChangelogStore, CommentStore, FeedbackStore, RoadmapStore, StoreError};
use feedback_types::{
    ChangelogEntry, ChangelogId, Comment, CommentId, FeedbackId, FeedbackItem, NewChangelogEntry,
    NewComment, NewFeedback, NewRoadmapItem, RoadmapId, RoadmapItem, Timestamp,
};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Collections {
    feedback: BTreeMap<FeedbackId, FeedbackItem>,
    comments: BTreeMap<FeedbackId, Vec<Comment>>,
    roadmap: BTreeMap<RoadmapId, RoadmapItem>,
    changelog: BTreeMap<ChangelogId, ChangelogEntry>,
    last_feedback: u64,
    last_comment: u64,
    last_roadmap: u64,
    last_changelog: u64,
}

/// An in-memory board store.
/// Thread-safe for use with tokio's multi-threaded runtime.
pub struct MemoryStore {
    inner: Mutex<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Collections::default()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Collections>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedbackStore for MemoryStore {
    fn fetch_item(&self, id: FeedbackId) -> Result<FeedbackItem, StoreError> {
        self.lock()?
            .feedback
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("feedback {id}")))
    }

    fn save_item(&self, item: &FeedbackItem) -> Result<FeedbackItem, StoreError> {
        item.check_invariants()?;
        let mut inner = self.lock()?;
        match inner.feedback.get_mut(&item.id) {
            Some(slot) => {
                *slot = item.clone();
                Ok(item.clone())
            }
            None => Err(StoreError::NotFound(format!("feedback {}", item.id))),
        }
    }

    fn insert_item(
        &self,
        submission: NewFeedback,
        now: Timestamp,
    ) -> Result<FeedbackItem, StoreError> {
        let mut inner = self.lock()?;
        inner.last_feedback += 1;
        let item = FeedbackItem::new(FeedbackId::new(inner.last_feedback), submission, now);
        inner.feedback.insert(item.id, item.clone());
        Ok(item)
    }

    fn delete_item(&self, id: FeedbackId) -> Result<(), StoreError> {
        self.lock()?
            .feedback
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("feedback {id}")))
    }

    fn list_items(&self) -> Result<Vec<FeedbackItem>, StoreError> {
        Ok(self.lock()?.feedback.values().cloned().collect())
    }
}

impl CommentStore for MemoryStore {
    fn list_comments(&self, feedback_id: FeedbackId) -> Result<Vec<Comment>, StoreError> {
        let inner = self.lock()?;
        if !inner.feedback.contains_key(&feedback_id) {
            return Err(StoreError::NotFound(format!("feedback {feedback_id}")));
        }
        Ok(inner
            .comments
            .get(&feedback_id)
            .cloned()
            .unwrap_or_default())
    }

    fn add_comment(
        &self,
        feedback_id: FeedbackId,
        comment: NewComment,
        now: Timestamp,
    ) -> Result<Comment, StoreError> {
        let mut inner = self.lock()?;
        if !inner.feedback.contains_key(&feedback_id) {
            return Err(StoreError::NotFound(format!("feedback {feedback_id}")));
        }
        inner.last_comment += 1;
        let stored = Comment {
            id: CommentId::new(inner.last_comment),
            feedback_id,
            author: comment.author_or_anonymous(),
            content: comment.content,
            created_at: now,
        };
        inner
            .comments
            .entry(feedback_id)
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }
}

impl RoadmapStore for MemoryStore {
    fn get_roadmap_item(&self, id: RoadmapId) -> Result<RoadmapItem, StoreError> {
        self.lock()?
            .roadmap
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("roadmap item {id}")))
    }

    fn insert_roadmap_item(&self, item: NewRoadmapItem) -> Result<RoadmapItem, StoreError> {
        let mut inner = self.lock()?;
        inner.last_roadmap += 1;
        let stored = RoadmapItem::new(RoadmapId::new(inner.last_roadmap), item);
        inner.roadmap.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn save_roadmap_item(&self, item: &RoadmapItem) -> Result<RoadmapItem, StoreError> {
        let mut inner = self.lock()?;
        match inner.roadmap.get_mut(&item.id) {
            Some(slot) => {
                *slot = item.clone();
                Ok(item.clone())
            }
            None => Err(StoreError::NotFound(format!("roadmap item {}", item.id))),
        }
    }

    fn delete_roadmap_item(&self, id: RoadmapId) -> Result<(), StoreError> {
        self.lock()?
            .roadmap
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("roadmap item {id}")))
    }

    fn list_roadmap_items(&self) -> Result<Vec<RoadmapItem>, StoreError> {
        Ok(self.lock()?.roadmap.values().cloned().collect())
    }
}

impl ChangelogStore for MemoryStore {
    fn get_changelog_entry(&self, id: ChangelogId) -> Result<ChangelogEntry, StoreError> {
        self.lock()?
            .changelog
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("changelog entry {id}")))
    }

    fn insert_changelog_entry(
        &self,
        entry: NewChangelogEntry,
        now: Timestamp,
    ) -> Result<ChangelogEntry, StoreError> {
        let mut inner = self.lock()?;
        inner.last_changelog += 1;
        let stored = ChangelogEntry::new(ChangelogId::new(inner.last_changelog), entry, now);
        inner.changelog.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn save_changelog_entry(&self, entry: &ChangelogEntry) -> Result<ChangelogEntry, StoreError> {
        let mut inner = self.lock()?;
        match inner.changelog.get_mut(&entry.id) {
            Some(slot) => {
                *slot = entry.clone();
                Ok(entry.clone())
            }
            None => Err(StoreError::NotFound(format!("changelog entry {}", entry.id))),
        }
    }

    fn delete_changelog_entry(&self, id: ChangelogId) -> Result<(), StoreError> {
        self.lock()?
            .changelog
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("changelog entry {id}")))
    }

    fn list_changelog_entries(&self) -> Result<Vec<ChangelogEntry>, StoreError> {
        Ok(self.lock()?.changelog.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedback_types::Category;

    fn submission(title: &str) -> NewFeedback {
        NewFeedback {
            title: title.to_string(),
            description: "details".to_string(),
            category: Category::Improvement,
        }
    }

    #[test]
    fn test_insert_assigns_increasing_ids() {
        let store = MemoryStore::new();
        let a = store.insert_item(submission("a"), Timestamp::new(1)).unwrap();
        let b = store.insert_item(submission("b"), Timestamp::new(2)).unwrap();
        assert_eq!(a.id, FeedbackId::new(1));
        assert_eq!(b.id, FeedbackId::new(2));
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let store = MemoryStore::new();
        let a = store.insert_item(submission("a"), Timestamp::new(1)).unwrap();
        store.delete_item(a.id).unwrap();
        let b = store.insert_item(submission("b"), Timestamp::new(2)).unwrap();
        assert_eq!(b.id, FeedbackId::new(2));
    }

    #[test]
    fn test_fetch_missing_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.fetch_item(FeedbackId::new(7)),
            Err(StoreError::NotFound(_))
        ));
        assert!(!store.contains_item(FeedbackId::new(7)).unwrap());
    }

    #[test]
    fn test_save_rejects_unknown_id() {
        let store = MemoryStore::new();
        let item = FeedbackItem::new(FeedbackId::new(3), submission("x"), Timestamp::new(1));
        assert!(matches!(store.save_item(&item), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_save_rejects_inconsistent_counters() {
        let store = MemoryStore::new();
        let mut item = store.insert_item(submission("x"), Timestamp::new(1)).unwrap();
        item.upvotes = 3;
        assert!(matches!(store.save_item(&item), Err(StoreError::Corruption(_))));
    }

    #[test]
    fn test_comments_require_existing_item() {
        let store = MemoryStore::new();
        let err = store
            .add_comment(FeedbackId::new(1), NewComment::default(), Timestamp::new(1))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_comments_listed_in_order() {
        let store = MemoryStore::new();
        let item = store.insert_item(submission("c"), Timestamp::new(1)).unwrap();
        for text in ["first", "second"] {
            store
                .add_comment(
                    item.id,
                    NewComment {
                        author: None,
                        content: text.to_string(),
                    },
                    Timestamp::new(2),
                )
                .unwrap();
        }
        let comments = store.list_comments(item.id).unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].content, "first");
        assert_eq!(comments[1].author, NewComment::ANONYMOUS);
    }
}
