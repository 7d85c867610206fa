use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::file::FileHandle;
use super::media::MediaType;
use super::submission::{Language, ReleaseRights, SubmissionMetadata};

/// Correlation token binding one file's chunk uploads to its finalize call.
///
/// A fresh identifier is generated for every upload session; one never spans two files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UploadId(Uuid);

impl UploadId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UploadId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UploadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One chunk on its way to the transport.
#[derive(Clone)]
pub struct ChunkUpload {
    pub data: Bytes,
    pub filename: String,
    /// Position of this chunk (0-indexed).
    pub chunk_index: u64,
    pub total_chunks: u64,
    pub upload_id: UploadId,
}

impl fmt::Debug for ChunkUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkUpload")
            .field("filename", &self.filename)
            .field("chunk_index", &self.chunk_index)
            .field("total_chunks", &self.total_chunks)
            .field("upload_id", &self.upload_id)
            .field("size", &self.data.len())
            .finish()
    }
}

/// Terminal outcome of one file's chunk uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadOutcome {
    Succeeded,
    /// The chunk at `chunk_index` was the first to fail; later chunks were never sent.
    Failed { chunk_index: u64 },
}

/// Result of an upload session, created once every attempted chunk has reported back.
#[derive(Debug, Clone)]
pub struct UploadSessionResult {
    pub file: FileHandle,
    pub upload_id: UploadId,
    pub total_chunks: u64,
    pub outcome: UploadOutcome,
}

impl UploadSessionResult {
    pub fn succeeded(&self) -> bool {
        self.outcome == UploadOutcome::Succeeded
    }
}

/// Per-file part of a finalize call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizeFile {
    pub filename: String,
    pub total_chunks: u64,
    pub upload_id: UploadId,
    pub media_type: MediaType,
}

/// Request that registers a content record bound to a previously uploaded chunk set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalizeRequest {
    pub title: String,
    pub description: String,
    pub media_type: MediaType,
    pub filename: String,
    pub total_chunks: u64,
    pub release_rights: ReleaseRights,
    pub language: Language,
    #[serde(rename = "upload_uuid")]
    pub upload_id: UploadId,
    pub user_id: String,
    pub category_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub use_uid_filename: bool,
}

impl FinalizeRequest {
    pub fn new(metadata: &SubmissionMetadata, file: &FinalizeFile) -> Self {
        Self {
            title: metadata.title.clone(),
            description: metadata.description.clone(),
            media_type: file.media_type,
            filename: file.filename.clone(),
            total_chunks: file.total_chunks,
            release_rights: metadata.release_rights,
            language: metadata.language,
            upload_id: file.upload_id,
            user_id: metadata.user_id.clone(),
            category_id: metadata.category_id.clone(),
            latitude: metadata.latitude,
            longitude: metadata.longitude,
            use_uid_filename: false,
        }
    }
}

/// Final status of one file in a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Succeeded,
    UploadFailed,
    FinalizeFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutcome {
    pub file_name: String,
    pub status: FileStatus,
    /// First chunk that failed, for `UploadFailed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_chunk: Option<u64>,
}

/// The externally visible result of a submission run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReport {
    pub attempted_files: usize,
    pub succeeded_files: usize,
    /// One entry per input file, in input order.
    pub per_file_outcome: Vec<FileOutcome>,
}

impl SubmissionReport {
    /// No media files were part of the submission.
    pub fn is_text_only(&self) -> bool {
        self.attempted_files == 0
    }

    pub fn count_with_status(&self, status: FileStatus) -> usize {
        self.per_file_outcome
            .iter()
            .filter(|o| o.status == status)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> SubmissionMetadata {
        SubmissionMetadata {
            title: "Bathukamma".to_string(),
            description: "d".repeat(40),
            full_story_text: "s".repeat(40),
            category_id: "cat-9".to_string(),
            release_rights: ReleaseRights::FamilyOrFriend,
            language: Language::Telugu,
            latitude: Some(17.4),
            longitude: None,
            user_id: "user-1".to_string(),
        }
    }

    #[test]
    fn test_upload_ids_are_unique() {
        let a = UploadId::new();
        let b = UploadId::new();
        assert_ne!(a, b);
        assert_eq!(a.to_string().len(), 36);
    }

    #[test]
    fn test_finalize_request_copies_metadata() {
        let file = FinalizeFile {
            filename: "flowers.png".to_string(),
            total_chunks: 3,
            upload_id: UploadId::new(),
            media_type: MediaType::Image,
        };
        let request = FinalizeRequest::new(&metadata(), &file);
        assert_eq!(request.title, "Bathukamma");
        assert_eq!(request.filename, "flowers.png");
        assert_eq!(request.total_chunks, 3);
        assert_eq!(request.upload_id, file.upload_id);
        assert!(!request.use_uid_filename);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["upload_uuid"], file.upload_id.to_string());
        assert_eq!(json["release_rights"], "family_or_friend");
        assert_eq!(json["media_type"], "image");
        assert!(json.get("longitude").is_none());
    }

    #[test]
    fn test_report_helpers() {
        let report = SubmissionReport {
            attempted_files: 2,
            succeeded_files: 1,
            per_file_outcome: vec![
                FileOutcome {
                    file_name: "a.mp3".to_string(),
                    status: FileStatus::FinalizeFailed,
                    failed_chunk: None,
                },
                FileOutcome {
                    file_name: "b.mp4".to_string(),
                    status: FileStatus::Succeeded,
                    failed_chunk: None,
                },
            ],
        };
        assert!(!report.is_text_only());
        assert_eq!(report.count_with_status(FileStatus::FinalizeFailed), 1);
        assert_eq!(report.count_with_status(FileStatus::Succeeded), 1);
        assert!(SubmissionReport::default().is_text_only());
    }
}
