//! Store wrapper that injects storage faults on demand.

use feedback_store::{ChangelogStore, CommentStore, FeedbackStore, RoadmapStore, StoreError};
use feedback_types::{
    ChangelogEntry, ChangelogId, Comment, FeedbackId, FeedbackItem, NewChangelogEntry,
    NewComment, NewFeedback, NewRoadmapItem, RoadmapId, RoadmapItem, Timestamp,
};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

/// Wraps another store and fails reads or writes while the matching switch is on.
/// It can also stall the next item fetch to widen race windows in tests.
pub struct FailingStore<S> {
    inner: S,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes_attempted: AtomicU64,
    fetch_delay_ms: AtomicU64,
}

impl<S> FailingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            writes_attempted: AtomicU64::new(0),
            fetch_delay_ms: AtomicU64::new(0),
        }
    }

    pub fn fail_reads(&self, on: bool) {
        self.fail_reads.store(on, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, on: bool) {
        self.fail_writes.store(on, Ordering::SeqCst);
    }

    /// Number of write calls seen, failed or not.
    pub fn writes_attempted(&self) -> u64 {
        self.writes_attempted.load(Ordering::SeqCst)
    }

    /// Block the next `fetch_item` call for `delay`. Later fetches are not delayed.
    pub fn delay_next_fetch(&self, delay: Duration) {
        let millis = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self.fetch_delay_ms.store(millis, Ordering::SeqCst);
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn read(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected read failure".to_string()));
        }
        Ok(())
    }

    fn write(&self) -> Result<(), StoreError> {
        self.writes_attempted.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected write failure".to_string()));
        }
        Ok(())
    }
}

impl<S: FeedbackStore> FeedbackStore for FailingStore<S> {
    fn fetch_item(&self, id: FeedbackId) -> Result<FeedbackItem, StoreError> {
        let delay = self.fetch_delay_ms.swap(0, Ordering::SeqCst);
        if delay > 0 {
            thread::sleep(Duration::from_millis(delay));
        }
        self.read()?;
        self.inner.fetch_item(id)
    }

    fn save_item(&self, item: &FeedbackItem) -> Result<FeedbackItem, StoreError> {
        self.write()?;
        self.inner.save_item(item)
    }

    fn insert_item(
        &self,
        submission: NewFeedback,
        now: Timestamp,
    ) -> Result<FeedbackItem, StoreError> {
        self.write()?;
        self.inner.insert_item(submission, now)
    }

    fn delete_item(&self, id: FeedbackId) -> Result<(), StoreError> {
        self.write()?;
        self.inner.delete_item(id)
    }

    fn list_items(&self) -> Result<Vec<FeedbackItem>, StoreError> {
        self.read()?;
        self.inner.list_items()
    }
}

impl<S: CommentStore> CommentStore for FailingStore<S> {
    fn list_comments(&self, feedback_id: FeedbackId) -> Result<Vec<Comment>, StoreError> {
        self.read()?;
        self.inner.list_comments(feedback_id)
    }

    fn add_comment(
        &self,
        feedback_id: FeedbackId,
        comment: NewComment,
        now: Timestamp,
    ) -> Result<Comment, StoreError> {
        self.write()?;
        self.inner.add_comment(feedback_id, comment, now)
    }
}

impl<S: RoadmapStore> RoadmapStore for FailingStore<S> {
    fn get_roadmap_item(&self, id: RoadmapId) -> Result<RoadmapItem, StoreError> {
        self.read()?;
        self.inner.get_roadmap_item(id)
    }

    fn insert_roadmap_item(&self, item: NewRoadmapItem) -> Result<RoadmapItem, StoreError> {
        self.write()?;
        self.inner.insert_roadmap_item(item)
    }

    fn save_roadmap_item(&self, item: &RoadmapItem) -> Result<RoadmapItem, StoreError> {
        self.write()?;
        self.inner.save_roadmap_item(item)
    }

    fn delete_roadmap_item(&self, id: RoadmapId) -> Result<(), StoreError> {
        self.write()?;
        self.inner.delete_roadmap_item(id)
    }

    fn list_roadmap_items(&self) -> Result<Vec<RoadmapItem>, StoreError> {
        self.read()?;
        self.inner.list_roadmap_items()
    }
}

impl<S: ChangelogStore> ChangelogStore for FailingStore<S> {
    fn get_changelog_entry(&self, id: ChangelogId) -> Result<ChangelogEntry, StoreError> {
        self.read()?;
        self.inner.get_changelog_entry(id)
    }

    fn insert_changelog_entry(
        &self,
        entry: NewChangelogEntry,
        now: Timestamp,
    ) -> Result<ChangelogEntry, StoreError> {
        self.write()?;
        self.inner.insert_changelog_entry(entry, now)
    }

    fn save_changelog_entry(&self, entry: &ChangelogEntry) -> Result<ChangelogEntry, StoreError> {
        self.write()?;
        self.inner.save_changelog_entry(entry)
    }

    fn delete_changelog_entry(&self, id: ChangelogId) -> Result<(), StoreError> {
        self.write()?;
        self.inner.delete_changelog_entry(id)
    }

    fn list_changelog_entries(&self) -> Result<Vec<ChangelogEntry>, StoreError> {
        self.read()?;
        self.inner.list_changelog_entries()
    }
}
