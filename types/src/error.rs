//! Validation errors raised when building or checking domain records.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("invalid voter identifier: {0}")]
    InvalidVoter(String),

    #[error("invalid identifier '{0}'")]
    InvalidId(String),

    #[error("{side} counter is {counter} but {members} voters are recorded")]
    CounterMismatch {
        side: &'static str,
        counter: u32,
        members: usize,
    },

    #[error("voter {0} is recorded as both upvoting and downvoting")]
    OverlappingVote(String),
}
