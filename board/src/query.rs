//! Search, filter and sort options for listing feedback.

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use feedback_types::{FeedbackItem, FeedbackStatus, TypeError};
use serde::{Deserialize, Serialize};

/// Status filter: every item, or only items in one status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Only(FeedbackStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: FeedbackStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() || s.trim().eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        filter.to_string()
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => fmt::Display::fmt(status, f),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Highest net score first.
    #[default]
    Votes,
    Newest,
    Oldest,
}

/// Options for [`crate::FeedbackService::list`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackQuery {
    /// Case-insensitive substring matched against title and description.
    pub q: Option<String>,
    pub status: StatusFilter,
    pub sort: SortOrder,
}

impl FeedbackQuery {
    fn needle(&self) -> Option<String> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }

    /// Filter and order `items`. Ties always fall back to ascending id.
    pub fn apply(&self, items: Vec<FeedbackItem>) -> Vec<FeedbackItem> {
        let needle = self.needle();
        let mut selected: Vec<FeedbackItem> = items
            .into_iter()
            .filter(|item| self.status.matches(item.status))
            .filter(|item| match &needle {
                Some(n) => {
                    item.title.to_lowercase().contains(n)
                        || item.description.to_lowercase().contains(n)
                }
                None => true,
            })
            .collect();

        match self.sort {
            SortOrder::Votes => selected.sort_by_key(|item| (Reverse(item.score()), item.id)),
            SortOrder::Newest => selected.sort_by_key(|item| (Reverse(item.created_at), item.id)),
            SortOrder::Oldest => selected.sort_by_key(|item| (item.created_at, item.id)),
        }
        selected
    }
}
