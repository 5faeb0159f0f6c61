//! Vote reconciliation for the feedback board.
//!
//! Each voter holds one of three stances on an item: unvoted, upvoted or
//! downvoted. Voting in the direction already held retracts the vote; voting
//! the other way switches it. Counters always equal the size of their
//! membership sets and the two sets never share a voter.
//!
//! [`VoteEngine`] runs the transition against a store, one writer per item at
//! a time. [`OptimisticVote`] runs it against a local copy and can undo it if
//! the remote commit fails.

pub mod engine;
pub mod error;
pub mod locks;
pub mod optimistic;
pub mod transition;

pub use engine::VoteEngine;
pub use error::VoteError;
pub use locks::KeyedLocks;
pub use optimistic::{apply_optimistically, OptimisticVote};
pub use transition::{apply_vote, restore_stance, TransitionKind, VoteTransition};
