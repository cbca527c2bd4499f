//! Ephemeral playback URLs.
//!
//! A [`PlaybackUrl`] is a process-local handle (`blob:golfitter/<uuid>`) that
//! lets a stored payload be fed to a video element without another database
//! read. Nothing here is persisted and nothing is reclaimed automatically:
//! whoever creates a URL releases it, either explicitly or by dropping the
//! [`PlaybackHandle`] that owns it.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use bytes::Bytes;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use golfitter_shared::constants::PLAYBACK_URL_PREFIX;
use golfitter_shared::VideoId;

use crate::models::StoredVideo;

/// A live playback URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PlaybackUrl(String);

impl PlaybackUrl {
    fn from_token(token: &str) -> Self {
        Self(format!("{PLAYBACK_URL_PREFIX}{token}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The opaque part after the scheme prefix.
    pub fn token(&self) -> &str {
        token_of(&self.0)
    }
}

impl std::fmt::Display for PlaybackUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The payload behind a live URL.
#[derive(Debug, Clone)]
pub struct PlaybackSource {
    pub video_id: VideoId,
    pub mime_type: String,
    pub data: Bytes,
}

/// Table of live playback URLs. Cheap to clone; clones share the table.
#[derive(Debug, Clone, Default)]
pub struct PlaybackRegistry {
    entries: Arc<RwLock<HashMap<String, PlaybackSource>>>,
}

impl PlaybackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new URL for `video`. Every call yields a distinct URL.
    pub fn create(&self, video: &StoredVideo) -> PlaybackUrl {
        let token = Uuid::new_v4().to_string();
        let source = PlaybackSource {
            video_id: video.id.clone(),
            mime_type: video.mime_type.clone(),
            data: Bytes::copy_from_slice(&video.data),
        };

        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token.clone(), source);

        debug!(id = %video.id, token = %token, "Created playback url");
        PlaybackUrl::from_token(&token)
    }

    /// Invalidate a URL (full URL or bare token). Unknown and already
    /// released URLs are ignored. Returns whether anything was released.
    pub fn release(&self, url: &str) -> bool {
        let removed = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token_of(url))
            .is_some();

        if removed {
            debug!(url, "Released playback url");
        } else {
            debug!(url, "Release of unknown playback url ignored");
        }
        removed
    }

    /// Look up the payload behind a live URL (full URL or bare token).
    pub fn resolve(&self, url: &str) -> Option<PlaybackSource> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token_of(url))
            .cloned()
    }

    /// Register a URL owned by a guard that releases it on drop.
    pub fn acquire(&self, video: &StoredVideo) -> PlaybackHandle {
        PlaybackHandle {
            registry: self.clone(),
            url: Some(self.create(video)),
        }
    }

    /// Number of live URLs.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Owns one playback URL for as long as it is rendered.
///
/// Swapping the source with [`PlaybackHandle::replace`] releases the old URL
/// first; dropping the handle releases the current one.
#[derive(Debug)]
pub struct PlaybackHandle {
    registry: PlaybackRegistry,
    url: Option<PlaybackUrl>,
}

impl PlaybackHandle {
    pub fn url(&self) -> Option<&PlaybackUrl> {
        self.url.as_ref()
    }

    /// Point the handle at a different video.
    pub fn replace(&mut self, video: &StoredVideo) -> &PlaybackUrl {
        if let Some(old) = self.url.take() {
            self.registry.release(old.as_str());
        }
        self.url.insert(self.registry.create(video))
    }

    /// Release now instead of waiting for drop.
    pub fn release(mut self) {
        self.release_current();
    }

    fn release_current(&mut self) {
        if let Some(url) = self.url.take() {
            self.registry.release(url.as_str());
        }
    }
}

impl Drop for PlaybackHandle {
    fn drop(&mut self) {
        self.release_current();
    }
}

fn token_of(url: &str) -> &str {
    url.strip_prefix(PLAYBACK_URL_PREFIX).unwrap_or(url)
}
