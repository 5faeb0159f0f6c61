//! LMDB storage backend for the feedback board.
//!
//! Implements all storage traits from `feedback-store` using the `heed` LMDB
//! bindings. Each collection maps to one LMDB database within a single
//! environment; values are bincode-encoded and keys are big-endian ids so
//! iteration follows id order.

pub mod changelog;
pub mod comment;
pub mod environment;
pub mod error;
pub mod feedback;
pub mod integrity;
pub mod roadmap;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use integrity::{check_data_dir, check_integrity, IntegrityReport};
