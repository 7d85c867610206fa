//! File validation helpers applied before anything is sent over the network.

use std::path::{Component, Path};

use crate::constants::OCTET_STREAM;
use crate::AppError;

/// Lowercase extension of `filename`, if it has one.
pub fn file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .filter(|e| !e.is_empty())
}

/// MIME type expected for a file extension.
pub fn content_type_for_extension(extension: &str) -> &'static str {
    match extension.to_lowercase().as_str() {
        // Images
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        // Videos
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "webm" => "video/webm",
        // Audio
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "m4a" => "audio/mp4",
        // Documents
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => OCTET_STREAM,
    }
}

pub fn validate_file_size(filename: &str, file_size: u64, max_size: u64) -> Result<(), AppError> {
    if file_size > max_size {
        return Err(AppError::PayloadTooLarge(format!(
            "{} exceeds maximum allowed size of {} MB",
            filename,
            max_size / 1024 / 1024
        )));
    }
    Ok(())
}

/// Validate file extension against an allowlist; returns the normalized extension.
pub fn validate_file_extension(
    filename: &str,
    allowed_extensions: &[String],
) -> Result<String, AppError> {
    let extension = file_extension(filename).unwrap_or_default();

    if !allowed_extensions
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(&extension))
    {
        return Err(AppError::UnsupportedFileType(format!(
            "{}: allowed extensions are {}",
            filename,
            allowed_extensions.join(", ")
        )));
    }

    Ok(extension)
}

/// Reject paths that try to climb out of the working directory.
pub fn reject_parent_components(path: &Path) -> Result<(), AppError> {
    if path.components().any(|c| c == Component::ParentDir) {
        return Err(AppError::InvalidInput(format!(
            "Invalid file path: {}",
            path.display()
        )));
    }
    Ok(())
}
