//! Shared constants.

/// Fixed chunk size used when splitting files for upload (1 MiB).
pub const CHUNK_SIZE_BYTES: u64 = 1024 * 1024;

/// Minimum length, in characters, of the brief description and of the full story text.
pub const MIN_STORY_TEXT_CHARS: u64 = 32;

/// Default per-file upload limit (10 MB).
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 10;

/// File extensions accepted by the story form.
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "mp4", "mov", "avi", "mp3", "wav", "pdf",
];

/// Default remote corpus service.
pub const DEFAULT_API_BASE_URL: &str = "https://api.corpus.swecha.org";

/// Default API version segment (`/api/{version}`).
pub const DEFAULT_API_VERSION: &str = "v1";

/// Fallback MIME type for files with an unknown extension.
pub const OCTET_STREAM: &str = "application/octet-stream";
