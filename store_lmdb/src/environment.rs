//! LMDB environment setup and shared record helpers.

use std::ops::Bound;
use std::path::Path;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions, RwTxn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::LmdbError;

pub(crate) type RawDb = Database<Bytes, Bytes>;

pub(crate) const LAST_FEEDBACK_ID: &[u8] = b"last_feedback_id";
pub(crate) const LAST_COMMENT_ID: &[u8] = b"last_comment_id";
pub(crate) const LAST_ROADMAP_ID: &[u8] = b"last_roadmap_id";
pub(crate) const LAST_CHANGELOG_ID: &[u8] = b"last_changelog_id";

/// Database names created in every environment.
pub const DATABASES: &[&str] = &["feedback", "comments", "roadmap", "changelog", "meta"];

/// Wraps the LMDB environment and all database handles.
///
/// Implements every board storage trait, so one value serves as the whole
/// `BoardStore`.
pub struct LmdbEnvironment {
    pub(crate) env: Env,
    pub(crate) feedback_db: RawDb,
    pub(crate) comments_db: RawDb,
    pub(crate) roadmap_db: RawDb,
    pub(crate) changelog_db: RawDb,
    pub(crate) meta_db: RawDb,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given directory.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;

        // SAFETY: the environment is opened once per process for this path and
        // the memory map is never modified outside of heed transactions.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(DATABASES.len() as u32)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let feedback_db: RawDb = env.create_database(&mut wtxn, Some("feedback"))?;
        let comments_db: RawDb = env.create_database(&mut wtxn, Some("comments"))?;
        let roadmap_db: RawDb = env.create_database(&mut wtxn, Some("roadmap"))?;
        let changelog_db: RawDb = env.create_database(&mut wtxn, Some("changelog"))?;
        let meta_db: RawDb = env.create_database(&mut wtxn, Some("meta"))?;
        wtxn.commit()?;

        info!(path = %path.display(), map_size, "opened LMDB environment");

        Ok(Self {
            env,
            feedback_db,
            comments_db,
            roadmap_db,
            changelog_db,
            meta_db,
        })
    }

    /// Bump and return the id counter stored under `key`.
    pub(crate) fn next_id(&self, wtxn: &mut RwTxn<'_>, key: &[u8]) -> Result<u64, LmdbError> {
        let last = match self.meta_db.get(&**wtxn, key)? {
            Some(bytes) => decode_u64(bytes)?,
            None => 0,
        };
        let next = last + 1;
        self.meta_db.put(wtxn, key, &next.to_be_bytes())?;
        Ok(next)
    }

    pub(crate) fn get_record<T: DeserializeOwned>(
        &self,
        db: &RawDb,
        key: &[u8],
    ) -> Result<Option<T>, LmdbError> {
        let rtxn = self.env.read_txn()?;
        match db.get(&rtxn, key)? {
            Some(bytes) => Ok(Some(bincode::deserialize(bytes)?)),
            None => Ok(None),
        }
    }

    /// Overwrite an existing record. Returns `false` if no record has `key`.
    pub(crate) fn replace_record<T: Serialize>(
        &self,
        db: &RawDb,
        key: &[u8],
        value: &T,
    ) -> Result<bool, LmdbError> {
        let bytes = bincode::serialize(value)?;
        let mut wtxn = self.env.write_txn()?;
        if db.get(&wtxn, key)?.is_none() {
            return Ok(false);
        }
        db.put(&mut wtxn, key, &bytes)?;
        wtxn.commit()?;
        Ok(true)
    }

    /// Store a new record under the next id from `counter`.
    pub(crate) fn insert_record<T: Serialize>(
        &self,
        db: &RawDb,
        counter: &[u8],
        build: impl FnOnce(u64) -> T,
    ) -> Result<T, LmdbError> {
        let mut wtxn = self.env.write_txn()?;
        let id = self.next_id(&mut wtxn, counter)?;
        let record = build(id);
        let bytes = bincode::serialize(&record)?;
        db.put(&mut wtxn, &id.to_be_bytes(), &bytes)?;
        wtxn.commit()?;
        Ok(record)
    }

    /// Remove a record. Returns `false` if no record had `key`.
    pub(crate) fn delete_record(&self, db: &RawDb, key: &[u8]) -> Result<bool, LmdbError> {
        let mut wtxn = self.env.write_txn()?;
        let deleted = db.delete(&mut wtxn, key)?;
        wtxn.commit()?;
        Ok(deleted)
    }

    /// Every record in key order.
    pub(crate) fn list_records<T: DeserializeOwned>(&self, db: &RawDb) -> Result<Vec<T>, LmdbError> {
        let rtxn = self.env.read_txn()?;
        let mut records = Vec::new();
        for result in db.iter(&rtxn)? {
            let (_key, bytes) = result?;
            records.push(bincode::deserialize(bytes)?);
        }
        Ok(records)
    }

    /// Records whose keys fall between `low` and `high`, inclusive.
    pub(crate) fn range_records<T: DeserializeOwned>(
        &self,
        db: &RawDb,
        low: &[u8],
        high: &[u8],
    ) -> Result<Vec<T>, LmdbError> {
        let rtxn = self.env.read_txn()?;
        let bounds = (Bound::Included(low), Bound::Included(high));
        let mut records = Vec::new();
        for result in db.range(&rtxn, &bounds)? {
            let (_key, bytes) = result?;
            records.push(bincode::deserialize(bytes)?);
        }
        Ok(records)
    }
}

pub(crate) fn decode_u64(bytes: &[u8]) -> Result<u64, LmdbError> {
    let arr: [u8; 8] = bytes
        .try_into()
        .map_err(|_| LmdbError::Serialization("id counter has unexpected byte length".to_string()))?;
    Ok(u64::from_be_bytes(arr))
}

#[cfg(test)]
pub(crate) fn open_test_env() -> (tempfile::TempDir, LmdbEnvironment) {
    let dir = tempfile::tempdir().expect("temp dir");
    let env = LmdbEnvironment::open(dir.path(), 10 * 1024 * 1024).expect("open env");
    (dir, env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reopen_keeps_counters() {
        let dir = tempfile::tempdir().unwrap();
        {
            let env = LmdbEnvironment::open(dir.path(), 1 << 20).unwrap();
            let mut wtxn = env.env.write_txn().unwrap();
            assert_eq!(env.next_id(&mut wtxn, LAST_FEEDBACK_ID).unwrap(), 1);
            assert_eq!(env.next_id(&mut wtxn, LAST_FEEDBACK_ID).unwrap(), 2);
            wtxn.commit().unwrap();
        }
        let env = LmdbEnvironment::open(dir.path(), 1 << 20).unwrap();
        let mut wtxn = env.env.write_txn().unwrap();
        assert_eq!(env.next_id(&mut wtxn, LAST_FEEDBACK_ID).unwrap(), 3);
    }

    #[test]
    fn decode_rejects_short_counter() {
        assert!(decode_u64(&[1, 2, 3]).is_err());
    }
}
