//! Kathalu Core Library
//!
//! This crate provides the domain models, error types, configuration, validation and the
//! transport seam shared by every Kathalu component. It performs no network I/O itself.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod transport;
pub mod validation;

// Re-export commonly used types
pub use config::{ClientConfig, UploadPolicy};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use transport::{Transport, TransportError, TransportResult};
