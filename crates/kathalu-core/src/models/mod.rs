//! Data models for the application
//!
//! This module contains the data structures shared by the pipeline, the API client and the
//! CLI, organized by domain.

mod category;
mod contribution;
mod file;
mod media;
mod submission;
mod upload;
mod user;

// Re-export all models for convenient imports
pub use category::*;
pub use contribution::*;
pub use file::*;
pub use media::*;
pub use submission::*;
pub use upload::*;
pub use user::*;
