//! One "share a story" action: zero or more files plus one shared metadata payload.

use std::num::NonZeroU64;

use kathalu_core::models::{
    FileHandle, FileOutcome, FileStatus, FinalizeFile, MediaType, SubmissionMetadata,
    SubmissionReport, UploadOutcome, UploadSessionResult,
};
use kathalu_core::validation::{validate_file_extension, validate_file_size};
use kathalu_core::{AppError, Transport, UploadPolicy};

use super::finalize::{FinalizeInvoker, FinalizeOutcome};
use super::session::UploadSession;

/// Uploads every file of a submission, then finalizes the files whose upload succeeded.
///
/// Files are processed one at a time in input order. A failure on one file never affects
/// its siblings and never aborts the batch.
pub struct SubmissionBatch<'a, T: Transport + ?Sized> {
    transport: &'a T,
    policy: UploadPolicy,
}

impl<'a, T: Transport + ?Sized> SubmissionBatch<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self::with_policy(transport, UploadPolicy::default())
    }

    pub fn with_policy(transport: &'a T, policy: UploadPolicy) -> Self {
        Self { transport, policy }
    }

    /// Run the submission.
    ///
    /// Returns `Err` only for validation failures, which are detected before any network
    /// call. Transport failures are reported per file in the returned report.
    pub async fn run(
        &self,
        files: &[FileHandle],
        metadata: &SubmissionMetadata,
    ) -> Result<SubmissionReport, AppError> {
        let chunk_size = self.validate(files, metadata)?;

        if files.is_empty() {
            tracing::info!(user_id = %metadata.user_id, "Submission has no media files");
            return Ok(SubmissionReport::default());
        }

        let session = UploadSession::with_chunk_size(self.transport, chunk_size);
        let mut uploads: Vec<UploadSessionResult> = Vec::with_capacity(files.len());
        let mut succeeded_files = 0usize;
        for file in files {
            let result = session.run(file).await;
            if result.succeeded() {
                succeeded_files += 1;
            }
            uploads.push(result);
        }

        let finalizer = FinalizeInvoker::new(self.transport);
        let mut per_file_outcome = Vec::with_capacity(uploads.len());
        for upload in &uploads {
            let outcome = match upload.outcome {
                UploadOutcome::Failed { chunk_index } => FileOutcome {
                    file_name: upload.file.name().to_string(),
                    status: FileStatus::UploadFailed,
                    failed_chunk: Some(chunk_index),
                },
                UploadOutcome::Succeeded => {
                    let file = FinalizeFile {
                        filename: upload.file.name().to_string(),
                        total_chunks: upload.total_chunks,
                        upload_id: upload.upload_id,
                        media_type: MediaType::from_mime(upload.file.mime_type()),
                    };
                    let status = match finalizer.finalize(metadata, &file).await {
                        FinalizeOutcome::Succeeded => FileStatus::Succeeded,
                        FinalizeOutcome::Failed => {
                            succeeded_files -= 1;
                            FileStatus::FinalizeFailed
                        }
                    };
                    FileOutcome {
                        file_name: file.filename,
                        status,
                        failed_chunk: None,
                    }
                }
            };
            per_file_outcome.push(outcome);
        }

        let report = SubmissionReport {
            attempted_files: files.len(),
            succeeded_files,
            per_file_outcome,
        };
        debug_assert_eq!(
            report.succeeded_files,
            report.count_with_status(FileStatus::Succeeded)
        );

        tracing::info!(
            user_id = %metadata.user_id,
            attempted_files = report.attempted_files,
            succeeded_files = report.succeeded_files,
            "Submission finished"
        );

        Ok(report)
    }

    fn validate(
        &self,
        files: &[FileHandle],
        metadata: &SubmissionMetadata,
    ) -> Result<NonZeroU64, AppError> {
        metadata.check()?;

        let chunk_size = NonZeroU64::new(self.policy.chunk_size).ok_or_else(|| {
            AppError::InvalidInput("chunk_size must be greater than 0".to_string())
        })?;

        for file in files {
            if let Some(max) = self.policy.max_file_size {
                validate_file_size(file.name(), file.size_bytes(), max)?;
            }
            if let Some(allowed) = &self.policy.allowed_extensions {
                validate_file_extension(file.name(), allowed)?;
            }
        }

        Ok(chunk_size)
    }
}
