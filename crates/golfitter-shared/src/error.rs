use thiserror::Error;

/// Rejections raised at the upload boundary, before anything reaches the
/// video store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("unsupported format: {mime_type} (supported formats are MP4, MOV, AVI)")]
    UnsupportedFormat { mime_type: String },

    #[error("file too large: {size} bytes (max {max})")]
    FileTooLarge { size: u64, max: u64 },
}

impl UploadError {
    /// Short message suitable for an inline, dismissible notice.
    pub fn user_message(&self) -> &'static str {
        match self {
            UploadError::UnsupportedFormat { .. } => "unsupported format",
            UploadError::FileTooLarge { .. } => "file too large",
        }
    }
}
