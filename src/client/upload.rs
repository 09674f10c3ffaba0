//! Local upload validation.
//!
//! Runs before any network call so an oversized or mistyped file is
//! rejected immediately, with the same messages the server would produce.

use crate::api::{has_allowed_extension, ALLOWED_UPLOAD_EXTENSIONS, MAX_UPLOAD_BYTES};

use super::error::ClientError;

/// Validate a candidate upload by name and size.
pub fn validate_upload(file_name: &str, size_bytes: usize) -> Result<(), ClientError> {
    if !has_allowed_extension(file_name) {
        return Err(ClientError::InvalidRequest {
            message: format!(
                "Invalid file type. Allowed: {}",
                ALLOWED_UPLOAD_EXTENSIONS.join(", ")
            ),
        });
    }
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(ClientError::InvalidRequest {
            message: "File too large. Maximum size is 10 MB.".to_string(),
        });
    }
    Ok(())
}
