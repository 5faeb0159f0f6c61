//! Closed enumerations for categories, statuses, timelines and change kinds.
//!
//! Each variant has a single kebab-case wire name. Parsing is lenient about
//! case and separators ("In Progress", "in_progress" and "in-progress" are the
//! same status) so legacy records normalise at the boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TypeError;

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant, )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = TypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match normalise(s).as_str() {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(TypeError::UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

fn normalise(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            ' ' | '_' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

string_enum!(
    /// What kind of feedback was submitted.
    Category, "category" {
        Feature => "feature",
        Bug => "bug",
        Improvement => "improvement",
    }
);

impl Default for Category {
    fn default() -> Self {
        Self::Feature
    }
}

string_enum!(
    /// Moderation status of a feedback item.
    FeedbackStatus, "status" {
        /// Freshly submitted; every item starts here.
        New => "new",
        InReview => "in-review",
        Planned => "planned",
        InProgress => "in-progress",
        Completed => "completed",
    }
);

impl Default for FeedbackStatus {
    fn default() -> Self {
        Self::New
    }
}

string_enum!(
    /// Column of the roadmap board.
    RoadmapStatus, "roadmap status" {
        Planned => "planned",
        InProgress => "in-progress",
        Completed => "completed",
    }
);

impl Default for RoadmapStatus {
    fn default() -> Self {
        Self::Planned
    }
}

string_enum!(
    /// Coarse delivery horizon of a roadmap item.
    Timeline, "timeline" {
        Now => "now",
        Next => "next",
        Later => "later",
    }
);

string_enum!(
    /// Kind of change announced in a changelog entry.
    ChangeKind, "change kind" {
        Feature => "feature",
        Improvement => "improvement",
        Bugfix => "bugfix",
    }
);

impl Default for ChangeKind {
    fn default() -> Self {
        Self::Feature
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_display_labels() {
        assert_eq!("In Progress".parse::<RoadmapStatus>().unwrap(), RoadmapStatus::InProgress);
        assert_eq!("in_review".parse::<FeedbackStatus>().unwrap(), FeedbackStatus::InReview);
        assert_eq!("COMPLETED".parse::<FeedbackStatus>().unwrap(), FeedbackStatus::Completed);
    }

    #[test]
    fn unknown_variant_is_rejected() {
        let err = "wishlist".parse::<Category>().unwrap_err();
        assert_eq!(
            err,
            TypeError::UnknownVariant {
                kind: "category",
                value: "wishlist".to_string()
            }
        );
    }

    #[test]
    fn as_str_matches_wire_name() {
        for status in FeedbackStatus::ALL {
            let json = serde_json::to_string(status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            assert_eq!(status.as_str().parse::<FeedbackStatus>().unwrap(), *status);
        }
    }

    #[test]
    fn deserialize_rejects_unknown_string() {
        assert!(serde_json::from_str::<ChangeKind>("\"hotfix\"").is_err());
    }
}
