//! Vote direction and the per-voter stance on an item.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which button the voter pressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn opposite(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A voter's current position on one item. These are the only three states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteStance {
    Unvoted,
    Upvoted,
    Downvoted,
}

impl VoteStance {
    /// The direction of the vote held, if any.
    pub fn direction(&self) -> Option<VoteDirection> {
        match self {
            Self::Unvoted => None,
            Self::Upvoted => Some(VoteDirection::Up),
            Self::Downvoted => Some(VoteDirection::Down),
        }
    }

    /// Contribution of this stance to `upvotes - downvotes`.
    pub fn score(&self) -> i64 {
        match self {
            Self::Unvoted => 0,
            Self::Upvoted => 1,
            Self::Downvoted => -1,
        }
    }
}
