//! # golfitter-shared
//!
//! Types and pure logic shared by every Golfitter crate: upload validation,
//! video identifiers, the pro-golfer matching function with its seed
//! profiles, and the mock swing analysis presets.

pub mod analysis;
pub mod constants;
pub mod error;
pub mod matching;
pub mod profiles;
pub mod types;
pub mod upload;

pub use error::UploadError;
pub use types::VideoId;
