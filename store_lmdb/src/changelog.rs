//! LMDB implementation of ChangelogStore.

use feedback_store::{ChangelogStore, StoreError};
use feedback_types::{ChangelogEntry, ChangelogId, NewChangelogEntry, Timestamp};

use crate::environment::{LmdbEnvironment, LAST_CHANGELOG_ID};

impl ChangelogStore for LmdbEnvironment {
    fn get_changelog_entry(&self, id: ChangelogId) -> Result<ChangelogEntry, StoreError> {
        self.get_record(&self.changelog_db, &id.to_be_bytes())?
            .ok_or_else(|| StoreError::NotFound(format!("changelog entry {id}")))
    }

    fn insert_changelog_entry(
        &self,
        entry: NewChangelogEntry,
        now: Timestamp,
    ) -> Result<ChangelogEntry, StoreError> {
        Ok(self.insert_record(&self.changelog_db, LAST_CHANGELOG_ID, |id| {
            ChangelogEntry::new(ChangelogId::new(id), entry, now)
        })?)
    }

    fn save_changelog_entry(&self, entry: &ChangelogEntry) -> Result<ChangelogEntry, StoreError> {
        if self.replace_record(&self.changelog_db, &entry.id.to_be_bytes(), entry)? {
            Ok(entry.clone())
        } else {
            Err(StoreError::NotFound(format!("changelog entry {}", entry.id)))
        }
    }

    fn delete_changelog_entry(&self, id: ChangelogId) -> Result<(), StoreError> {
        if self.delete_record(&self.changelog_db, &id.to_be_bytes())? {
            Ok(())
        } else {
            Err(StoreError::NotFound(format!("changelog entry {id}")))
        }
    }

    fn list_changelog_entries(&self) -> Result<Vec<ChangelogEntry>, StoreError> {
        Ok(self.list_records(&self.changelog_db)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::environment::open_test_env;
    use feedback_store::{ChangelogStore, StoreError};
    use feedback_types::{ChangeKind, ChangelogId, NewChangelogEntry, Timestamp};

    fn release(version: &str) -> NewChangelogEntry {
        NewChangelogEntry {
            title: format!("Release {version}"),
            description: "notes".to_string(),
            kind: ChangeKind::Bugfix,
            version: version.to_string(),
            release_date: None,
        }
    }

    #[test]
    fn entries_round_trip_through_lmdb() {
        let (_dir, env) = open_test_env();
        let a = env.insert_changelog_entry(release("1.0.0"), Timestamp::new(10)).unwrap();
        let b = env.insert_changelog_entry(release("1.1.0"), Timestamp::new(20)).unwrap();
        assert_eq!(a.release_date, Timestamp::new(10));
        assert_eq!(env.get_changelog_entry(b.id).unwrap(), b);
        let versions: Vec<String> = env
            .list_changelog_entries()
            .unwrap()
            .into_iter()
            .map(|e| e.version)
            .collect();
        assert_eq!(versions, ["1.0.0", "1.1.0"]);
    }

    #[test]
    fn missing_entry_is_not_found() {
        let (_dir, env) = open_test_env();
        assert!(matches!(
            env.delete_changelog_entry(ChangelogId::new(3)),
            Err(StoreError::NotFound(_))
        ));
    }
}
