//! Changelog entries announcing shipped changes.

use serde::{Deserialize, Serialize};

use crate::{ChangeKind, ChangelogId, Timestamp};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangelogEntry {
    pub id: ChangelogId,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    pub version: String,
    pub release_date: Timestamp,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChangelogEntry {
    pub title: String,
    pub description: String,
    #[serde(default, rename = "type")]
    pub kind: ChangeKind,
    pub version: String,
    /// Defaults to the creation time.
    #[serde(default)]
    pub release_date: Option<Timestamp>,
}

impl ChangelogEntry {
    pub fn new(id: ChangelogId, entry: NewChangelogEntry, now: Timestamp) -> Self {
        Self {
            id,
            title: entry.title,
            description: entry.description,
            kind: entry.kind,
            version: entry.version,
            release_date: entry.release_date.unwrap_or(now),
        }
    }
}

/// Partial update; absent fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangelogPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<ChangeKind>,
    pub version: Option<String>,
    pub release_date: Option<Timestamp>,
}

impl ChangelogPatch {
    pub fn apply(self, entry: &mut ChangelogEntry) {
        if let Some(title) = self.title {
            entry.title = title;
        }
        if let Some(description) = self.description {
            entry.description = description;
        }
        if let Some(kind) = self.kind {
            entry.kind = kind;
        }
        if let Some(version) = self.version {
            entry.version = version;
        }
        if let Some(date) = self.release_date {
            entry.release_date = date;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_date_defaults_to_now() {
        let entry = ChangelogEntry::new(
            ChangelogId::new(1),
            NewChangelogEntry {
                title: "Faster search".to_string(),
                description: "Search is 3x faster".to_string(),
                kind: ChangeKind::Improvement,
                version: "1.2.0".to_string(),
                release_date: None,
            },
            Timestamp::new(5_000),
        );
        assert_eq!(entry.release_date, Timestamp::new(5_000));
    }

    #[test]
    fn kind_is_serialized_as_type() {
        let raw = r#"{"title":"t","description":"d","type":"bugfix","version":"2.0.1"}"#;
        let entry: NewChangelogEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.kind, ChangeKind::Bugfix);
    }
}
