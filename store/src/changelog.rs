//! Changelog storage trait.

use crate::StoreError;
use feedback_types::{ChangelogEntry, ChangelogId, NewChangelogEntry, Timestamp};

pub trait ChangelogStore {
    fn get_changelog_entry(&self, id: ChangelogId) -> Result<ChangelogEntry, StoreError>;
    fn insert_changelog_entry(
        &self,
        entry: NewChangelogEntry,
        now: Timestamp,
    ) -> Result<ChangelogEntry, StoreError>;
    /// Full replace by id; `NotFound` if the id is unknown.
    fn save_changelog_entry(&self, entry: &ChangelogEntry) -> Result<ChangelogEntry, StoreError>;
    fn delete_changelog_entry(&self, id: ChangelogId) -> Result<(), StoreError>;
    /// All entries in ascending id order.
    fn list_changelog_entries(&self) -> Result<Vec<ChangelogEntry>, StoreError>;
}
