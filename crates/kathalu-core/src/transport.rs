//! Transport seam between the upload pipeline and the remote corpus service
//!
//! The pipeline never talks HTTP directly. It drives a `Transport`, which the API client
//! implements for production and tests implement with scripted responses.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ChunkUpload, ContributionsResponse, FinalizeRequest, MediaType};

/// Transport operation errors
///
/// The upload pipeline treats every variant the same way (the call did not succeed);
/// the distinction only matters for logging and front-end messages.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Remote service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Request rejected: {0}")]
    Rejected(String),
}

/// Result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;

/// Capability the upload pipeline consumes.
///
/// Each call is atomic from the pipeline's point of view: it either lands or it does not.
/// Credentials belong to the implementing value; nothing is read from process-wide state.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one chunk of a file, correlated to its siblings by `chunk.upload_id`.
    async fn upload_chunk(&self, chunk: ChunkUpload) -> TransportResult<()>;

    /// Ask the remote service to materialise a record from a completed chunk set.
    async fn finalize(&self, request: &FinalizeRequest) -> TransportResult<()>;

    /// Fetch one user's contributions of one media type. `Ok(None)` means the service
    /// had nothing for that user.
    async fn fetch_user_contributions(
        &self,
        user_id: &str,
        media_type: MediaType,
    ) -> TransportResult<Option<ContributionsResponse>>;
}
