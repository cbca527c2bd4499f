//! v001 -- Initial schema creation.
//!
//! Creates the `videos` table and its `uploaded_at` ordering index.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS videos (
    id           TEXT PRIMARY KEY NOT NULL,   -- video_<millis>_<base36>
    name         TEXT NOT NULL,
    mime_type    TEXT NOT NULL,
    size         INTEGER NOT NULL,
    data         BLOB NOT NULL,
    content_hash TEXT NOT NULL,               -- hex BLAKE3 of data
    uploaded_at  TEXT NOT NULL,               -- RFC-3339, UTC, microseconds
    duration     REAL,
    width        INTEGER,
    height       INTEGER
);

CREATE INDEX IF NOT EXISTS idx_videos_uploaded_at ON videos(uploaded_at);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
