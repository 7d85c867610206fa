//! Domain methods for the Kathalu API client.
//!
//! Response types come from `kathalu_core::models`; everything is parsed into typed
//! structs here, once, at the boundary.

use anyhow::{Context, Result};
use kathalu_core::models::{
    Category, ChunkUpload, ContributionsResponse, FinalizeRequest, LoginRequest, MediaType,
    TokenResponse, UserProfile,
};
use kathalu_core::TransportResult;
use reqwest::multipart::{Form, Part};

use crate::ApiClient;

impl ApiClient {
    /// Exchange phone number and password for an access token.
    pub async fn login(&self, phone: &str, password: &str) -> Result<TokenResponse> {
        let body = LoginRequest {
            phone: phone.to_string(),
            password: password.to_string(),
        };
        self.post_json("/auth/login", &body)
            .await
            .context("Login failed")
    }

    /// Profile of the user the credentials belong to.
    pub async fn current_user(&self) -> Result<UserProfile> {
        self.get("/auth/me")
            .await
            .context("Failed to fetch current user")
    }

    pub async fn categories(&self) -> Result<Vec<Category>> {
        self.get("/categories/")
            .await
            .context("Failed to fetch categories")
    }

    /// Send one chunk as a multipart form.
    pub async fn upload_chunk(&self, chunk: ChunkUpload) -> TransportResult<()> {
        let ChunkUpload {
            data,
            filename,
            chunk_index,
            total_chunks,
            upload_id,
        } = chunk;

        let form = Form::new()
            .part(
                "chunk",
                Part::stream(data).file_name(filename.clone()),
            )
            .text("filename", filename)
            .text("chunk_index", chunk_index.to_string())
            .text("total_chunks", total_chunks.to_string())
            .text("upload_uuid", upload_id.to_string());

        self.post_multipart("/records/upload/chunk", form).await
    }

    /// Register the record for a fully uploaded chunk set.
    pub async fn finalize_record(&self, request: &FinalizeRequest) -> TransportResult<()> {
        self.post_form("/records/upload", request).await
    }

    /// Contributions of one user for one media type. `None` when the service has none.
    pub async fn user_contributions(
        &self,
        user_id: &str,
        media_type: MediaType,
    ) -> TransportResult<Option<ContributionsResponse>> {
        let path = format!(
            "/users/{}/contributions/{}",
            urlencoding::encode(user_id),
            media_type.as_str()
        );
        self.get_optional(&path).await
    }
}
