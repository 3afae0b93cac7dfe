//! Evidence file upload rules: accepted MIME types, size limits, and
//! collision-free stored file names.

use crate::error::CoreError;
use crate::types::Timestamp;

/// Maximum number of files accepted in one upload request.
pub const MAX_FILES_PER_UPLOAD: usize = 5;

/// Maximum size of a single uploaded file (10 MiB).
pub const MAX_FILE_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// Images (JPEG, PNG, GIF) and documents (PDF, DOC, DOCX).
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

pub fn validate_mime_type(mime: &str) -> Result<(), CoreError> {
    if ALLOWED_MIME_TYPES.contains(&mime) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "File type '{mime}' is not allowed. Only images (JPEG, PNG, GIF) and documents (PDF, DOC, DOCX) can be uploaded"
        )))
    }
}

pub fn validate_file_size(size: usize) -> Result<(), CoreError> {
    if size > MAX_FILE_SIZE_BYTES {
        Err(CoreError::Validation(format!(
            "File exceeds the maximum size of {} MiB",
            MAX_FILE_SIZE_BYTES / (1024 * 1024)
        )))
    } else {
        Ok(())
    }
}

/// Build the on-disk name for an upload: `<millis>-<unique>-<sanitized original>`.
///
/// Path separators and anything outside `[A-Za-z0-9._-]` are replaced so the
/// name can never escape the upload directory.
pub fn stored_file_name(original: &str, now: Timestamp, unique: &str) -> String {
    let base = original.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(original);
    let sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let sanitized = sanitized.trim_start_matches('.');
    let sanitized = if sanitized.is_empty() { "file" } else { sanitized };

    format!("{}-{unique}-{sanitized}", now.timestamp_millis())
}
