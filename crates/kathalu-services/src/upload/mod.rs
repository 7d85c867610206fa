//! Chunked upload pipeline.

pub mod batch;
pub mod chunker;
pub mod finalize;
pub mod session;
