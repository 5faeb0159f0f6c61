//! Release notes.

use std::cmp::Reverse;
use std::sync::Arc;

use feedback_store::BoardStore;
use feedback_types::{ChangelogEntry, ChangelogId, ChangelogPatch, Clock, NewChangelogEntry};
use tracing::info;

use crate::{required, BoardError};

pub struct ChangelogService {
    store: Arc<dyn BoardStore>,
    clock: Arc<dyn Clock>,
}

impl ChangelogService {
    pub fn new(store: Arc<dyn BoardStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Every entry, newest release first. Equal dates list the higher id first.
    pub fn list(&self) -> Result<Vec<ChangelogEntry>, BoardError> {
        let mut entries = self.store.list_changelog_entries()?;
        entries.sort_by_key(|e| Reverse((e.release_date, e.id)));
        Ok(entries)
    }

    pub fn get(&self, id: ChangelogId) -> Result<ChangelogEntry, BoardError> {
        Ok(self.store.get_changelog_entry(id)?)
    }

    /// Publish an entry. Title, description and version must not be blank.
    pub fn create(&self, entry: NewChangelogEntry) -> Result<ChangelogEntry, BoardError> {
        let entry = NewChangelogEntry {
            title: required("title", entry.title)?,
            description: required("description", entry.description)?,
            version: required("version", entry.version)?,
            ..entry
        };
        let created = self.store.insert_changelog_entry(entry, self.clock.now())?;
        info!(changelog_id = %created.id, version = %created.version, "changelog entry published");
        Ok(created)
    }

    pub fn update(
        &self,
        id: ChangelogId,
        patch: ChangelogPatch,
    ) -> Result<ChangelogEntry, BoardError> {
        let patch = ChangelogPatch {
            title: patch.title.map(|t| required("title", t)).transpose()?,
            description: patch
                .description
                .map(|d| required("description", d))
                .transpose()?,
            version: patch.version.map(|v| required("version", v)).transpose()?,
            ..patch
        };
        let mut entry = self.store.get_changelog_entry(id)?;
        patch.apply(&mut entry);
        Ok(self.store.save_changelog_entry(&entry)?)
    }

    pub fn delete(&self, id: ChangelogId) -> Result<(), BoardError> {
        self.store.delete_changelog_entry(id)?;
        info!(changelog_id = %id, "changelog entry deleted");
        Ok(())
    }

    /// Entries for one exact version string, newest first.
    pub fn by_version(&self, version: &str) -> Result<Vec<ChangelogEntry>, BoardError> {
        let version = version.trim();
        let mut entries = self.list()?;
        entries.retain(|e| e.version == version);
        Ok(entries)
    }
}
