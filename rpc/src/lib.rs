//! HTTP JSON API for the feedback board.
//!
//! Provides endpoints for:
//! - Feedback submission, listing, moderation and deletion
//! - Up/down voting with toggle and switch semantics
//! - Comments on feedback items
//! - Roadmap items and the grouped planning board
//! - Changelog entries

pub mod error;
pub mod handlers;
pub mod server;

pub use error::RpcError;
pub use server::{router, RpcServer};
