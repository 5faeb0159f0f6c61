//! Store-assigned integer identifiers for each record collection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TypeError;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub fn new(raw: u64) -> Self {
                Self(raw)
            }

            pub fn get(&self) -> u64 {
                self.0
            }

            /// The identifier following this one.
            pub fn next(&self) -> Self {
                Self(self.0 + 1)
            }

            /// Big-endian key bytes; sort order matches numeric order.
            pub fn to_be_bytes(&self) -> [u8; 8] {
                self.0.to_be_bytes()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = TypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| TypeError::InvalidId(s.to_string()))
            }
        }
    };
}

record_id!(
    /// Identifier of a feedback item, immutable once assigned.
    FeedbackId
);
record_id!(
    /// Identifier of a comment on a feedback item.
    CommentId
);
record_id!(
    /// Identifier of a roadmap item.
    RoadmapId
);
record_id!(
    /// Identifier of a changelog entry.
    ChangelogId
);
