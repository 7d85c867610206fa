use async_trait::async_trait;
use kathalu_core::models::{ChunkUpload, ContributionsResponse, FinalizeRequest, MediaType};
use kathalu_core::{Transport, TransportResult};

use crate::ApiClient;

#[async_trait]
impl Transport for ApiClient {
    async fn upload_chunk(&self, chunk: ChunkUpload) -> TransportResult<()> {
        ApiClient::upload_chunk(self, chunk).await
    }

    async fn finalize(&self, request: &FinalizeRequest) -> TransportResult<()> {
        self.finalize_record(request).await
    }

    async fn fetch_user_contributions(
        &self,
        user_id: &str,
        media_type: MediaType,
    ) -> TransportResult<Option<ContributionsResponse>> {
        self.user_contributions(user_id, media_type).await
    }
}
