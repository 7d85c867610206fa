//! Registering a record for a fully uploaded file.

use kathalu_core::models::{FinalizeFile, FinalizeRequest, SubmissionMetadata};
use kathalu_core::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalizeOutcome {
    Succeeded,
    Failed,
}

/// Sends a single finalize request per file. No retry, no chunking.
pub struct FinalizeInvoker<'a, T: Transport + ?Sized> {
    transport: &'a T,
}

impl<'a, T: Transport + ?Sized> FinalizeInvoker<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    pub async fn finalize(
        &self,
        metadata: &SubmissionMetadata,
        file: &FinalizeFile,
    ) -> FinalizeOutcome {
        let request = FinalizeRequest::new(metadata, file);

        match self.transport.finalize(&request).await {
            Ok(()) => {
                tracing::info!(
                    upload_id = %file.upload_id,
                    filename = %file.filename,
                    media_type = %file.media_type,
                    total_chunks = file.total_chunks,
                    "Record finalized"
                );
                FinalizeOutcome::Succeeded
            }
            Err(e) => {
                tracing::warn!(
                    upload_id = %file.upload_id,
                    filename = %file.filename,
                    error = %e,
                    "Failed to finalize record"
                );
                FinalizeOutcome::Failed
            }
        }
    }
}
