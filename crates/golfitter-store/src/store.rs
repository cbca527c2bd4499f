//! Async video store.
//!
//! [`VideoStore`] is the entry point used by the rest of the application.
//! It does not touch the disk until the first operation; that operation opens
//! the database (running migrations) through a memoized initializer, and
//! every later call reuses the handle. Concurrent first callers all await the
//! same in-flight open. A failed open is not remembered, so the caller that
//! triggered it gets the error and the next operation tries again.
//!
//! SQLite work runs on the blocking pool behind a mutex, which serializes
//! access: a save followed by a list from the same flow always observes the
//! save.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use chrono::Utc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use golfitter_shared::VideoId;

use crate::database::{self, Database};
use crate::error::{Result, StoreError};
use crate::models::{NewVideo, StoredVideo, VideoSummary};
use crate::playback::{PlaybackHandle, PlaybackRegistry, PlaybackUrl};

struct Inner {
    /// `None` means the platform data directory.
    path: Option<PathBuf>,
    db: OnceCell<Arc<Mutex<Database>>>,
    playback: PlaybackRegistry,
}

/// Lazily opened, shareable handle to the local video database.
#[derive(Clone)]
pub struct VideoStore {
    inner: Arc<Inner>,
}

impl VideoStore {
    /// A store backed by the default database location.
    pub fn new() -> Self {
        Self::with_path(None)
    }

    /// A store backed by the database file at `path`.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self::with_path(Some(path.into()))
    }

    fn with_path(path: Option<PathBuf>) -> Self {
        Self {
            inner: Arc::new(Inner {
                path,
                db: OnceCell::new(),
                playback: PlaybackRegistry::new(),
            }),
        }
    }

    /// Whether the database has been opened yet.
    pub fn is_open(&self) -> bool {
        self.inner.db.initialized()
    }

    /// Open the database now rather than on first use.
    pub async fn open(&self) -> Result<()> {
        self.database().await.map(|_| ())
    }

    async fn database(&self) -> Result<Arc<Mutex<Database>>> {
        let db = self
            .inner
            .db
            .get_or_try_init(|| async {
                let path = match &self.inner.path {
                    Some(path) => path.clone(),
                    None => database::default_path()?,
                };

                let db = tokio::task::spawn_blocking(move || Database::open_at(&path))
                    .await?
                    .map_err(|e| {
                        tracing::error!(error = %e, "failed to open video database");
                        e
                    })?;

                Ok::<_, StoreError>(Arc::new(Mutex::new(db)))
            })
            .await?;

        Ok(db.clone())
    }

    async fn with_db<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.database().await?;
        tokio::task::spawn_blocking(move || {
            let guard = db.lock().map_err(|_| StoreError::LockPoisoned)?;
            f(&guard)
        })
        .await?
    }

    // -----------------------------------------------------------------------
    // Records
    // -----------------------------------------------------------------------

    /// Persist a validated upload and return its freshly generated id.
    pub async fn save(&self, new: NewVideo) -> Result<VideoId> {
        let name = new.name.clone();
        let size = new.size();

        let id = self
            .with_db(move |db| {
                let now = Utc::now();
                let video = StoredVideo::from_new(new, VideoId::generate_at(now), now);
                db.insert_video(&video)?;
                Ok(video.id)
            })
            .await?;

        info!(id = %id, name = %name, size, "Saved video");
        Ok(id)
    }

    /// Fetch a record. A missing id is `Ok(None)`.
    pub async fn get(&self, id: &VideoId) -> Result<Option<StoredVideo>> {
        let id = id.clone();
        self.with_db(move |db| db.get_video(&id)).await
    }

    /// Every stored record, in no particular order.
    pub async fn list_all(&self) -> Result<Vec<StoredVideo>> {
        self.with_db(|db| db.list_videos()).await
    }

    /// Every stored record, newest first.
    pub async fn list_recent(&self) -> Result<Vec<StoredVideo>> {
        self.with_db(|db| db.list_videos_recent()).await
    }

    /// Metadata of every stored record, newest first.
    pub async fn list_summaries(&self) -> Result<Vec<VideoSummary>> {
        self.with_db(|db| db.list_video_summaries()).await
    }

    /// Remove a record. Deleting a missing id is a no-op.
    pub async fn delete(&self, id: &VideoId) -> Result<()> {
        let owned = id.clone();
        let removed = self.with_db(move |db| db.delete_video(&owned)).await?;
        debug!(id = %id, removed, "Deleted video");
        Ok(())
    }

    /// Remove every record.
    pub async fn clear_all(&self) -> Result<()> {
        let removed = self.with_db(|db| db.clear_videos()).await?;
        info!(removed, "Cleared all videos");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Playback URLs
    // -----------------------------------------------------------------------

    /// Create an ephemeral playback URL. The caller must release it.
    pub fn url_for(&self, video: &StoredVideo) -> PlaybackUrl {
        self.inner.playback.create(video)
    }

    /// Release a URL from [`VideoStore::url_for`]. Unknown URLs are ignored.
    pub fn release_url(&self, url: &str) {
        self.inner.playback.release(url);
    }

    /// Payload behind a live URL.
    pub fn resolve_url(&self, url: &str) -> Option<(String, Bytes)> {
        self.inner
            .playback
            .resolve(url)
            .map(|source| (source.mime_type, source.data))
    }

    /// A URL that is released when the returned handle is dropped.
    pub fn acquire_playback(&self, video: &StoredVideo) -> PlaybackHandle {
        self.inner.playback.acquire(video)
    }

    pub fn playback(&self) -> &PlaybackRegistry {
        &self.inner.playback
    }
}

impl Default for VideoStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn test_store() -> (VideoStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = VideoStore::at(dir.path().join("videos.db"));
        (store, dir)
    }

    fn upload(name: &str, payload: &[u8]) -> NewVideo {
        NewVideo::new(name, "video/mp4", payload.to_vec())
    }

    #[tokio::test]
    async fn test_opens_lazily() {
        let (store, dir) = test_store();
        assert!(!store.is_open());
        assert!(!dir.path().join("videos.db").exists());

        store.list_all().await.unwrap();
        assert!(store.is_open());
        assert!(dir.path().join("videos.db").exists());
    }

    #[tokio::test]
    async fn test_round_trip() {
        let (store, _dir) = test_store();
        let id = store
            .save(upload("golf-swing.mp4", b"video content"))
            .await
            .unwrap();

        let video = store.get(&id).await.unwrap().expect("saved");
        assert_eq!(video.id, id);
        assert_eq!(video.name, "golf-swing.mp4");
        assert_eq!(video.mime_type, "video/mp4");
        assert_eq!(video.size, 13);
        assert_eq!(video.data, b"video content");
    }

    #[tokio::test]
    async fn test_ids_unique() {
        let (store, _dir) = test_store();
        let mut ids = HashSet::new();
        for i in 0..25 {
            let id = store
                .save(upload(&format!("{i}.mp4"), &[i as u8]))
                .await
                .unwrap();
            ids.insert(id);
        }
        assert_eq!(ids.len(), 25);
    }

    #[tokio::test]
    async fn test_list_complete() {
        let (store, _dir) = test_store();
        assert!(store.list_all().await.unwrap().is_empty());

        let mut saved = HashSet::new();
        for name in ["video1.mp4", "video2.mp4", "video3.mp4"] {
            saved.insert(store.save(upload(name, name.as_bytes())).await.unwrap());
        }

        let listed: HashSet<VideoId> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(listed, saved);

        for id in &listed {
            assert!(store.get(id).await.unwrap().is_some());
        }
    }

    #[tokio::test]
    async fn test_list_recent_newest_first() {
        let (store, _dir) = test_store();
        let mut saved = Vec::new();
        for name in ["first.mp4", "second.mp4", "third.mp4"] {
            saved.push(store.save(upload(name, name.as_bytes())).await.unwrap());
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let recent: Vec<VideoId> = store
            .list_recent()
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.id)
            .collect();
        saved.reverse();
        assert_eq!(recent, saved);
    }

    #[tokio::test]
    async fn test_delete_idempotent() {
        let (store, _dir) = test_store();
        let id = store.save(upload("a.mp4", b"a")).await.unwrap();

        store.delete(&id).await.unwrap();
        assert!(store.get(&id).await.unwrap().is_none());
        store.delete(&id).await.unwrap();
        assert!(store.get(&id).await.unwrap().is_none());

        store.delete(&VideoId::from("non-existent-id")).await.unwrap();
    }

    #[tokio::test]
    async fn test_clear_all() {
        let (store, _dir) = test_store();
        store.save(upload("1.mp4", b"1")).await.unwrap();
        store.save(upload("2.mp4", b"2")).await.unwrap();

        store.clear_all().await.unwrap();
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_open_failure_propagates_then_retries() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let store = VideoStore::at(blocker.join("videos.db"));
        assert!(store.save(upload("a.mp4", b"a")).await.is_err());
        assert!(!store.is_open());

        std::fs::remove_file(&blocker).unwrap();
        let id = store.save(upload("a.mp4", b"a")).await.unwrap();
        assert!(store.get(&id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_concurrent_first_access() {
        let (store, _dir) = test_store();

        let results = futures::future::join_all((0..8).map(|i| {
            let store = store.clone();
            async move { store.save(upload(&format!("{i}.mp4"), &[i])).await }
        }))
        .await;

        assert!(results.iter().all(|r| r.is_ok()));
        assert_eq!(store.list_all().await.unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_playback_urls() {
        let (store, _dir) = test_store();
        let id = store.save(upload("a.mp4", b"frames")).await.unwrap();
        let video = store.get(&id).await.unwrap().unwrap();

        let url = store.url_for(&video);
        let (mime, data) = store.resolve_url(url.as_str()).unwrap();
        assert_eq!(mime, "video/mp4");
        assert_eq!(&data[..], b"frames");

        store.release_url(url.as_str());
        store.release_url(url.as_str());
        assert!(store.resolve_url(url.as_str()).is_none());

        {
            let _handle = store.acquire_playback(&video);
            assert_eq!(store.playback().len(), 1);
        }
        assert!(store.playback().is_empty());
    }
}
