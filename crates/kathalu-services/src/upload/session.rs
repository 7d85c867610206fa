//! One file's upload lifecycle.

use std::num::NonZeroU64;

use kathalu_core::models::{
    ChunkUpload, FileHandle, UploadId, UploadOutcome, UploadSessionResult,
};
use kathalu_core::Transport;

use super::chunker::{split, DEFAULT_CHUNK_SIZE};

/// Drives one file's chunks through the transport, strictly one after another.
///
/// Chunks are sent in index order because the remote side reassembles by index. The
/// first failed chunk ends the session; nothing after it is sent and nothing is retried.
pub struct UploadSession<'a, T: Transport + ?Sized> {
    transport: &'a T,
    chunk_size: NonZeroU64,
}

impl<'a, T: Transport + ?Sized> UploadSession<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self {
            transport,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(transport: &'a T, chunk_size: NonZeroU64) -> Self {
        Self {
            transport,
            chunk_size,
        }
    }

    /// Upload every chunk of `file` under a freshly generated identifier.
    ///
    /// Never fails: transport errors are folded into the returned outcome.
    pub async fn run(&self, file: &FileHandle) -> UploadSessionResult {
        let upload_id = UploadId::new();
        let plan = split(file.size_bytes(), self.chunk_size);
        let total_chunks = plan.total_chunks();

        tracing::info!(
            upload_id = %upload_id,
            filename = %file.name(),
            size_bytes = file.size_bytes(),
            total_chunks,
            "Starting upload session"
        );

        for range in &plan {
            let chunk = ChunkUpload {
                data: file.bytes().slice(range.as_range()),
                filename: file.name().to_string(),
                chunk_index: range.index,
                total_chunks,
                upload_id,
            };

            match self.transport.upload_chunk(chunk).await {
                Ok(()) => {
                    tracing::debug!(
                        upload_id = %upload_id,
                        chunk_index = range.index,
                        total_chunks,
                        chunk_bytes = range.len(),
                        "Chunk uploaded"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        upload_id = %upload_id,
                        filename = %file.name(),
                        chunk_index = range.index,
                        total_chunks,
                        error = %e,
                        "Chunk upload failed, aborting file"
                    );
                    return UploadSessionResult {
                        file: file.clone(),
                        upload_id,
                        total_chunks,
                        outcome: UploadOutcome::Failed {
                            chunk_index: range.index,
                        },
                    };
                }
            }
        }

        tracing::info!(
            upload_id = %upload_id,
            filename = %file.name(),
            total_chunks,
            "Upload session completed"
        );

        UploadSessionResult {
            file: file.clone(),
            upload_id,
            total_chunks,
            outcome: UploadOutcome::Succeeded,
        }
    }
}
