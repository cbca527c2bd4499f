//! CRUD helpers for the `videos` table.
//!
//! Payloads are hashed on insert and checked again on every read, so a
//! damaged row surfaces as [`StoreError::Corrupted`] instead of bad bytes.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, ErrorCode, OptionalExtension};

use golfitter_shared::VideoId;

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::models::{NewVideo, StoredVideo, VideoMetadata, VideoSummary};

const VIDEO_COLUMNS: &str =
    "id, name, mime_type, size, data, content_hash, uploaded_at, duration, width, height";

impl StoredVideo {
    /// Build the record for a validated upload: assigns the id, stamps the
    /// upload time, and hashes the payload.
    pub fn from_new(new: NewVideo, id: VideoId, uploaded_at: DateTime<Utc>) -> Self {
        let content_hash = hash_payload(&new.data);
        Self {
            id,
            size: new.size(),
            name: new.name,
            mime_type: new.mime_type,
            data: new.data,
            content_hash,
            uploaded_at,
            metadata: None,
        }
    }
}

impl Database {
    /// Insert a new record. Fails with [`StoreError::DuplicateId`] if the id
    /// is taken; existing rows are never overwritten.
    pub fn insert_video(&self, video: &StoredVideo) -> Result<()> {
        let metadata = video.metadata.clone().unwrap_or_default();
        self.conn()
            .execute(
                "INSERT INTO videos (id, name, mime_type, size, data, content_hash, uploaded_at, duration, width, height)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    video.id.as_str(),
                    video.name,
                    video.mime_type,
                    video.size as i64,
                    video.data,
                    video.content_hash,
                    format_timestamp(&video.uploaded_at),
                    metadata.duration,
                    metadata.width,
                    metadata.height,
                ],
            )
            .map_err(|e| match e {
                rusqlite::Error::SqliteFailure(ref err, _)
                    if err.code == ErrorCode::ConstraintViolation =>
                {
                    StoreError::DuplicateId(video.id.to_string())
                }
                other => StoreError::Sqlite(other),
            })?;
        Ok(())
    }

    /// Fetch a record by id. A missing id is `Ok(None)`, not an error.
    pub fn get_video(&self, id: &VideoId) -> Result<Option<StoredVideo>> {
        let video = self
            .conn()
            .query_row(
                &format!("SELECT {VIDEO_COLUMNS} FROM videos WHERE id = ?1"),
                params![id.as_str()],
                row_to_video,
            )
            .optional()?;

        video.map(verify_payload).transpose()
    }

    /// Every record, in storage order.
    pub fn list_videos(&self) -> Result<Vec<StoredVideo>> {
        self.query_videos(&format!("SELECT {VIDEO_COLUMNS} FROM videos"))
    }

    /// Every record, newest first.
    pub fn list_videos_recent(&self) -> Result<Vec<StoredVideo>> {
        self.query_videos(&format!(
            "SELECT {VIDEO_COLUMNS} FROM videos ORDER BY uploaded_at DESC"
        ))
    }

    /// Metadata of every record, newest first, without loading payloads.
    pub fn list_video_summaries(&self) -> Result<Vec<VideoSummary>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, name, mime_type, size, uploaded_at
             FROM videos
             ORDER BY uploaded_at DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            let id: String = row.get(0)?;
            let size: i64 = row.get(3)?;
            let uploaded_str: String = row.get(4)?;
            Ok(VideoSummary {
                id: VideoId(id),
                name: row.get(1)?,
                mime_type: row.get(2)?,
                size: size as u64,
                uploaded_at: parse_timestamp(&uploaded_str, 4)?,
            })
        })?;

        let mut summaries = Vec::new();
        for row in rows {
            summaries.push(row?);
        }
        Ok(summaries)
    }

    /// Remove a record. Returns whether a row was deleted; a missing id is
    /// not an error.
    pub fn delete_video(&self, id: &VideoId) -> Result<bool> {
        let affected = self
            .conn()
            .execute("DELETE FROM videos WHERE id = ?1", params![id.as_str()])?;
        Ok(affected > 0)
    }

    /// Remove every record. Returns how many were deleted.
    pub fn clear_videos(&self) -> Result<usize> {
        let affected = self.conn().execute("DELETE FROM videos", [])?;
        Ok(affected)
    }

    pub fn count_videos(&self) -> Result<u64> {
        let count: i64 = self
            .conn()
            .query_row("SELECT COUNT(*) FROM videos", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn query_videos(&self, sql: &str) -> Result<Vec<StoredVideo>> {
        let mut stmt = self.conn().prepare(sql)?;
        let rows = stmt.query_map([], row_to_video)?;

        let mut videos = Vec::new();
        for row in rows {
            videos.push(verify_payload(row?)?);
        }
        Ok(videos)
    }
}

/// Hex BLAKE3 digest of a payload.
pub fn hash_payload(data: &[u8]) -> String {
    hex::encode(blake3::hash(data).as_bytes())
}

fn verify_payload(video: StoredVideo) -> Result<StoredVideo> {
    if hash_payload(&video.data) != video.content_hash {
        tracing::warn!(id = %video.id, "stored payload failed hash check");
        return Err(StoreError::Corrupted(video.id.to_string()));
    }
    Ok(video)
}

// fixed-width so lexical order in the index matches time order
fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(s: &str, column: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

fn row_to_video(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredVideo> {
    let id: String = row.get(0)?;
    let name: String = row.get(1)?;
    let mime_type: String = row.get(2)?;
    let size: i64 = row.get(3)?;
    let data: Vec<u8> = row.get(4)?;
    let content_hash: String = row.get(5)?;
    let uploaded_str: String = row.get(6)?;
    let duration: Option<f64> = row.get(7)?;
    let width: Option<u32> = row.get(8)?;
    let height: Option<u32> = row.get(9)?;

    let metadata = VideoMetadata {
        duration,
        width,
        height,
    };

    Ok(StoredVideo {
        id: VideoId(id),
        name,
        mime_type,
        size: size as u64,
        data,
        content_hash,
        uploaded_at: parse_timestamp(&uploaded_str, 6)?,
        metadata: (!metadata.is_empty()).then_some(metadata),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    fn test_db() -> (Database, TempDir) {
        let dir = TempDir::new().unwrap();
        let db = Database::open_at(&dir.path().join("videos.db")).unwrap();
        (db, dir)
    }

    fn record(name: &str, at: DateTime<Utc>) -> StoredVideo {
        StoredVideo::from_new(
            NewVideo::new(name, "video/mp4", name.as_bytes().to_vec()),
            VideoId::generate_at(at),
            at,
        )
    }

    #[test]
    fn test_insert_and_get() {
        let (db, _dir) = test_db();
        let video = record("swing.mp4", Utc::now());

        db.insert_video(&video).unwrap();
        let fetched = db.get_video(&video.id).unwrap().expect("present");

        assert_eq!(fetched.name, "swing.mp4");
        assert_eq!(fetched.mime_type, "video/mp4");
        assert_eq!(fetched.size, 9);
        assert_eq!(fetched.data, b"swing.mp4");
        assert!(fetched.metadata.is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let (db, _dir) = test_db();
        let video = record("a.mp4", Utc::now());
        db.insert_video(&video).unwrap();

        let mut clash = record("b.mp4", Utc::now());
        clash.id = video.id.clone();

        assert!(matches!(
            db.insert_video(&clash),
            Err(StoreError::DuplicateId(_))
        ));
        assert_eq!(db.get_video(&video.id).unwrap().unwrap().name, "a.mp4");
    }

    #[test]
    fn test_missing_is_none() {
        let (db, _dir) = test_db();
        assert!(db.get_video(&VideoId::from("nope")).unwrap().is_none());
    }

    #[test]
    fn test_recent_first_ordering() {
        let (db, _dir) = test_db();
        let base = Utc::now();
        let old = record("old.mp4", base - Duration::hours(2));
        let mid = record("mid.mp4", base - Duration::hours(1));
        let new = record("new.mp4", base);

        db.insert_video(&mid).unwrap();
        db.insert_video(&new).unwrap();
        db.insert_video(&old).unwrap();

        let names: Vec<String> = db
            .list_videos_recent()
            .unwrap()
            .into_iter()
            .map(|v| v.name)
            .collect();
        assert_eq!(names, vec!["new.mp4", "mid.mp4", "old.mp4"]);

        let summary_names: Vec<String> = db
            .list_video_summaries()
            .unwrap()
            .into_iter()
            .map(|v| v.name)
            .collect();
        assert_eq!(summary_names, names);
    }

    #[test]
    fn test_delete_and_clear() {
        let (db, _dir) = test_db();
        let a = record("a.mp4", Utc::now());
        let b = record("b.mp4", Utc::now());
        db.insert_video(&a).unwrap();
        db.insert_video(&b).unwrap();

        assert!(db.delete_video(&a.id).unwrap());
        assert!(!db.delete_video(&a.id).unwrap());
        assert_eq!(db.count_videos().unwrap(), 1);

        assert_eq!(db.clear_videos().unwrap(), 1);
        assert!(db.list_videos().unwrap().is_empty());
    }

    #[test]
    fn test_corrupted_payload_detected() {
        let (db, _dir) = test_db();
        let video = record("swing.mp4", Utc::now());
        db.insert_video(&video).unwrap();

        db.conn()
            .execute(
                "UPDATE videos SET data = ?1 WHERE id = ?2",
                params![b"tampered".to_vec(), video.id.as_str()],
            )
            .unwrap();

        assert!(matches!(
            db.get_video(&video.id),
            Err(StoreError::Corrupted(_))
        ));
    }

    #[test]
    fn test_metadata_round_trips_when_present() {
        let (db, _dir) = test_db();
        let mut video = record("meta.mp4", Utc::now());
        video.metadata = Some(VideoMetadata {
            duration: Some(3.5),
            width: Some(1920),
            height: Some(1080),
        });
        db.insert_video(&video).unwrap();

        let fetched = db.get_video(&video.id).unwrap().unwrap();
        assert_eq!(fetched.metadata, video.metadata);
    }
}
