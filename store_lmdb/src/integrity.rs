//! LMDB database integrity checks.
//!
//! Run on startup so a damaged environment is reported before the server
//! accepts requests.

use std::path::Path;

use feedback_types::FeedbackItem;
use tracing::warn;

use crate::environment::{LmdbEnvironment, DATABASES};
use crate::LmdbError;

/// Summary of an integrity check run.
#[derive(Debug, Default)]
pub struct IntegrityReport {
    pub databases_checked: u32,
    pub total_entries: u64,
    pub errors: Vec<String>,
}

impl IntegrityReport {
    /// Returns `true` if no errors were detected.
    pub fn is_healthy(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Count every database and verify the vote invariants of each feedback record.
///
/// Read failures and broken records are collected in the report rather than
/// aborting the check.
pub fn check_integrity(store: &LmdbEnvironment) -> Result<IntegrityReport, LmdbError> {
    let mut report = IntegrityReport::default();
    let rtxn = store.env.read_txn()?;

    let handles = [
        &store.feedback_db,
        &store.comments_db,
        &store.roadmap_db,
        &store.changelog_db,
        &store.meta_db,
    ];
    for (name, db) in DATABASES.iter().zip(handles) {
        report.databases_checked += 1;
        match db.len(&rtxn) {
            Ok(count) => report.total_entries += count,
            Err(e) => report
                .errors
                .push(format!("failed to read database '{name}': {e}")),
        }
    }

    for result in store.feedback_db.iter(&rtxn)? {
        let (key, bytes) = match result {
            Ok(pair) => pair,
            Err(e) => {
                report.errors.push(format!("failed to iterate feedback: {e}"));
                break;
            }
        };
        match bincode::deserialize::<FeedbackItem>(bytes) {
            Ok(item) => {
                if let Err(e) = item.check_invariants() {
                    report.errors.push(format!("feedback {}: {e}", item.id));
                }
            }
            Err(e) => report
                .errors
                .push(format!("undecodable feedback record {key:?}: {e}")),
        }
    }

    if !report.is_healthy() {
        warn!(errors = report.errors.len(), "LMDB integrity check found problems");
    }
    Ok(report)
}

/// Check that an existing data directory looks like an LMDB environment.
///
/// A missing directory is fine (fresh start). An existing directory without
/// `data.mdb` is an error.
pub fn check_data_dir(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Ok(());
    }
    let data_file = path.join("data.mdb");
    if !data_file.exists() {
        return Err(format!(
            "data directory exists but data.mdb is missing at {}",
            path.display()
        ));
    }
    Ok(())
}
