//! Nullable infrastructure for deterministic testing and development.
//!
//! External dependencies (clock, storage) are abstracted behind traits.
//! This crate provides implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests, or run the
//! daemon against [`MemoryStore`] when nothing needs to survive a restart.

pub mod clock;
pub mod failing;
pub mod store;

pub use clock::NullClock;
pub use failing::FailingStore;
pub use store::MemoryStore;
