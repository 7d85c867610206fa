//! Test helpers: a scripted in-memory transport and fixtures.

#![allow(dead_code)] // Each test binary uses a different subset

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use kathalu_core::models::{
    ChunkUpload, ContributionRecord, ContributionsResponse, FileHandle, FinalizeRequest, Language,
    MediaType, ReleaseRights, SubmissionMetadata, UploadId,
};
use kathalu_core::{Transport, TransportError, TransportResult};

/// One call observed by the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Chunk {
        filename: String,
        chunk_index: u64,
        total_chunks: u64,
        upload_id: UploadId,
        len: usize,
    },
    Finalize(FinalizeRequest),
    Fetch {
        user_id: String,
        media_type: MediaType,
    },
}

/// Transport that records every call and fails the ones it was told to fail.
#[derive(Default)]
pub struct ScriptedTransport {
    calls: Mutex<Vec<Call>>,
    failing_chunks: HashSet<(String, u64)>,
    failing_finalize: HashSet<String>,
    contributions: HashMap<MediaType, Vec<ContributionRecord>>,
    failing_fetch: HashSet<MediaType>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_chunk(mut self, filename: &str, chunk_index: u64) -> Self {
        self.failing_chunks
            .insert((filename.to_string(), chunk_index));
        self
    }

    pub fn fail_finalize(mut self, filename: &str) -> Self {
        self.failing_finalize.insert(filename.to_string());
        self
    }

    pub fn with_contributions(mut self, media_type: MediaType, records: Vec<ContributionRecord>) -> Self {
        self.contributions.insert(media_type, records);
        self
    }

    pub fn fail_fetch(mut self, media_type: MediaType) -> Self {
        self.failing_fetch.insert(media_type);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn chunk_calls_for(&self, filename: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Chunk { filename: f, .. } if f == filename))
            .collect()
    }

    pub fn finalize_calls(&self) -> Vec<FinalizeRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Finalize(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn upload_chunk(&self, chunk: ChunkUpload) -> TransportResult<()> {
        self.record(Call::Chunk {
            filename: chunk.filename.clone(),
            chunk_index: chunk.chunk_index,
            total_chunks: chunk.total_chunks,
            upload_id: chunk.upload_id,
            len: chunk.data.len(),
        });
        if self
            .failing_chunks
            .contains(&(chunk.filename, chunk.chunk_index))
        {
            return Err(TransportError::Status {
                status: 500,
                body: "chunk rejected".to_string(),
            });
        }
        Ok(())
    }

    async fn finalize(&self, request: &FinalizeRequest) -> TransportResult<()> {
        self.record(Call::Finalize(request.clone()));
        if self.failing_finalize.contains(&request.filename) {
            return Err(TransportError::Request("connection reset".to_string()));
        }
        Ok(())
    }

    async fn fetch_user_contributions(
        &self,
        user_id: &str,
        media_type: MediaType,
    ) -> TransportResult<Option<ContributionsResponse>> {
        self.record(Call::Fetch {
            user_id: user_id.to_string(),
            media_type,
        });
        if self.failing_fetch.contains(&media_type) {
            return Err(TransportError::Status {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(self
            .contributions
            .get(&media_type)
            .map(|records| ContributionsResponse {
                contributions: records.clone(),
            }))
    }
}

pub fn file_of_size(name: &str, mime_type: &str, size: usize) -> FileHandle {
    let data: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();
    FileHandle::new(name, mime_type, data)
}

pub fn metadata() -> SubmissionMetadata {
    SubmissionMetadata {
        title: "Ugadi pachadi".to_string(),
        description: "Festival Story: Ugadi pachadi\n\nBrief Description: six tastes of life"
            .to_string(),
        full_story_text: "Every Ugadi morning we mixed neem flowers, jaggery and tamarind."
            .to_string(),
        category_id: "3f1c2a90-category".to_string(),
        release_rights: ReleaseRights::Creator,
        language: Language::Telugu,
        latitude: Some(17.385),
        longitude: Some(78.4867),
        user_id: "user-42".to_string(),
    }
}

pub fn record(id: &str, timestamp: Option<&str>) -> ContributionRecord {
    ContributionRecord {
        id: id.to_string(),
        title: Some(format!("Story {}", id)),
        timestamp: timestamp.map(str::to_string),
        location: None,
        media_type: None,
    }
}
