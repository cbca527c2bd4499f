//! Upload boundary checks.
//!
//! Every candidate file passes through [`validate_upload`] before it is
//! handed to the video store. The MIME type is checked first, then the size.

use crate::constants::{ALLOWED_VIDEO_TYPES, MAX_UPLOAD_SIZE};
use crate::error::UploadError;

/// Returns `true` if `mime_type` is one of the accepted video formats.
pub fn is_supported_type(mime_type: &str) -> bool {
    ALLOWED_VIDEO_TYPES.contains(&mime_type)
}

/// Validate an upload's declared MIME type and byte size.
pub fn validate_upload(mime_type: &str, size: u64) -> Result<(), UploadError> {
    if !is_supported_type(mime_type) {
        return Err(UploadError::UnsupportedFormat {
            mime_type: mime_type.to_string(),
        });
    }

    if size > MAX_UPLOAD_SIZE {
        return Err(UploadError::FileTooLarge {
            size,
            max: MAX_UPLOAD_SIZE,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIB: u64 = 1024 * 1024;

    #[test]
    fn test_text_plain_rejected() {
        let err = validate_upload("text/plain", 1024).unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedFormat { .. }));
        assert_eq!(err.user_message(), "unsupported format");
    }

    #[test]
    fn test_oversized_rejected() {
        let err = validate_upload("video/mp4", 101 * MIB).unwrap_err();
        assert_eq!(
            err,
            UploadError::FileTooLarge {
                size: 101 * MIB,
                max: MAX_UPLOAD_SIZE
            }
        );
        assert_eq!(err.user_message(), "file too large");
    }

    #[test]
    fn test_accepted_types() {
        assert!(validate_upload("video/mp4", 10 * MIB).is_ok());
        assert!(validate_upload("video/quicktime", MIB).is_ok());
        assert!(validate_upload("video/x-msvideo", MIB).is_ok());
        assert!(validate_upload("video/webm", MIB).is_err());
    }

    #[test]
    fn test_exact_limit_accepted() {
        assert!(validate_upload("video/mp4", MAX_UPLOAD_SIZE).is_ok());
    }

    #[test]
    fn test_type_checked_before_size() {
        let err = validate_upload("image/png", 500 * MIB).unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedFormat { .. }));
    }
}
