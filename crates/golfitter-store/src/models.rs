//! Domain model structs persisted in the local video database.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use golfitter_shared::VideoId;

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Optional media properties. No write path fills these in yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VideoMetadata {
    pub duration: Option<f64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl VideoMetadata {
    pub fn is_empty(&self) -> bool {
        self.duration.is_none() && self.width.is_none() && self.height.is_none()
    }
}

// ---------------------------------------------------------------------------
// StoredVideo
// ---------------------------------------------------------------------------

/// A persisted video: metadata plus the raw payload.
///
/// Records are immutable once written; the only mutation is deletion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredVideo {
    pub id: VideoId,
    /// Original file name.
    pub name: String,
    /// MIME type as declared at upload.
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Payload length in bytes.
    pub size: u64,
    /// Raw video bytes. Never sent over the JSON API.
    #[serde(skip)]
    pub data: Vec<u8>,
    /// BLAKE3 hash of `data` (hex), checked on every read.
    pub content_hash: String,
    pub uploaded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<VideoMetadata>,
}

// ---------------------------------------------------------------------------
// VideoSummary
// ---------------------------------------------------------------------------

/// A stored video without its payload, for listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    pub id: VideoId,
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
}

impl From<&StoredVideo> for VideoSummary {
    fn from(video: &StoredVideo) -> Self {
        Self {
            id: video.id.clone(),
            name: video.name.clone(),
            mime_type: video.mime_type.clone(),
            size: video.size,
            uploaded_at: video.uploaded_at,
        }
    }
}

// ---------------------------------------------------------------------------
// NewVideo
// ---------------------------------------------------------------------------

/// An upload that passed validation and is ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVideo {
    pub name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl NewVideo {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data,
        }
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}
