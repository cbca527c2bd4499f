//! # golfitter-store
//!
//! Local storage for uploaded swing videos, backed by SQLite.
//!
//! Two layers are exposed: a synchronous [`Database`] handle that wraps a
//! `rusqlite::Connection` with typed CRUD helpers, and an async
//! [`VideoStore`] that opens the database lazily on first use and hands out
//! ephemeral playback URLs for stored payloads.

pub mod database;
pub mod migrations;
pub mod models;
pub mod playback;
pub mod store;
pub mod videos;

mod error;

pub use database::Database;
pub use error::{Result, StoreError};
pub use models::*;
pub use playback::{PlaybackHandle, PlaybackRegistry, PlaybackUrl};
pub use store::VideoStore;
