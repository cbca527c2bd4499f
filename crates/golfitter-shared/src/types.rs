use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{VIDEO_ID_PREFIX, VIDEO_ID_SUFFIX_LEN};

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

// Video identity = `video_<unix millis>_<base36 suffix>`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct VideoId(pub String);

impl VideoId {
    /// Generate a fresh id stamped with the current time.
    pub fn generate() -> Self {
        Self::generate_at(Utc::now())
    }

    /// Generate an id for the given creation instant.
    pub fn generate_at(at: DateTime<Utc>) -> Self {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..VIDEO_ID_SUFFIX_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        Self(format!(
            "{}_{}_{}",
            VIDEO_ID_PREFIX,
            at.timestamp_millis(),
            suffix
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for VideoId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VideoId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Human-readable byte count (`0 Bytes`, `1.5 KB`, `12.34 MB`).
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}
