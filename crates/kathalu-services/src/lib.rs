//! Kathalu Services
//!
//! The submission pipeline: files are split into chunks, each file's chunks are uploaded
//! in order under one upload identifier, and a record is finalized only for files whose
//! every chunk landed. The dashboard side merges a user's contributions across media types.
//!
//! Everything here talks to the remote service through [`kathalu_core::Transport`].

pub mod contributions;
pub mod upload;

pub use contributions::ContributionAggregator;
pub use upload::batch::SubmissionBatch;
pub use upload::chunker::{split, ChunkPlan, ChunkRange};
pub use upload::finalize::{FinalizeInvoker, FinalizeOutcome};
pub use upload::session::UploadSession;
