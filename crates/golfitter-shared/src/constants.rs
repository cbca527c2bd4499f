/// Application name
pub const APP_NAME: &str = "Golfitter";

/// Database file name inside the application data directory
pub const DATABASE_FILE: &str = "golfitter.db";

/// Current schema version of the video database
pub const SCHEMA_VERSION: u32 = 1;

/// Maximum accepted upload size in bytes (100 MiB)
pub const MAX_UPLOAD_SIZE: u64 = 100 * 1024 * 1024;

/// MIME types accepted at the upload boundary (MP4, MOV, AVI)
pub const ALLOWED_VIDEO_TYPES: [&str; 3] = ["video/mp4", "video/quicktime", "video/x-msvideo"];

/// Prefix of every generated video id
pub const VIDEO_ID_PREFIX: &str = "video";

/// Length of the random base36 suffix of a video id
pub const VIDEO_ID_SUFFIX_LEN: usize = 9;

/// Scheme prefix of ephemeral playback URLs
pub const PLAYBACK_URL_PREFIX: &str = "blob:golfitter/";

/// Matching weights (sum to 1.0)
pub const HEIGHT_WEIGHT: f64 = 0.3;
pub const WEIGHT_WEIGHT: f64 = 0.2;
pub const ARM_LENGTH_WEIGHT: f64 = 0.3;
pub const STRENGTH_WEIGHT: f64 = 0.2;

/// Minimum horizontal travel in pixels for a swipe to switch videos
pub const SWIPE_THRESHOLD_PX: f64 = 50.0;

/// Maximum drift in seconds tolerated between compared videos
pub const SYNC_TOLERANCE_SECS: f64 = 0.1;

/// Default HTTP API port
pub const DEFAULT_HTTP_PORT: u16 = 8080;
