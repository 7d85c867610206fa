//! Configuration module
//!
//! This module provides the client configuration (remote service location, credentials,
//! upload limits) loaded from the environment and an optional `.env` file.

use std::env;

use crate::constants::{
    CHUNK_SIZE_BYTES, DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_API_BASE_URL, DEFAULT_API_VERSION,
    DEFAULT_MAX_FILE_SIZE_MB,
};

const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Limits applied to a submission before any network call is made.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadPolicy {
    /// Size of every chunk except possibly the last.
    pub chunk_size: u64,
    /// Maximum accepted file size in bytes. `None` disables the check.
    pub max_file_size: Option<u64>,
    /// Accepted lowercase file extensions. `None` disables the check.
    pub allowed_extensions: Option<Vec<String>>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            chunk_size: CHUNK_SIZE_BYTES,
            max_file_size: None,
            allowed_extensions: None,
        }
    }
}

/// Client configuration
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub api_version: String,
    // Service API key (X-API-Key header)
    pub api_key: Option<String>,
    // Bearer token from a previous login
    pub api_token: Option<String>,
    pub request_timeout_secs: u64,
    // Upload configuration
    pub chunk_size_bytes: u64,
    pub max_file_size_bytes: u64,
    pub allowed_extensions: Vec<String>,
    // App metadata
    pub app_name: String,
    pub app_version: String,
    pub debug: bool,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let max_file_size_bytes = parse_max_file_size(env::var("MAX_FILE_SIZE_MB").ok().as_deref())?;
        let allowed_extensions =
            parse_allowed_extensions(env::var("ALLOWED_EXTENSIONS").ok().as_deref());

        let config = ClientConfig {
            api_base_url,
            api_version: env::var("API_VERSION")
                .unwrap_or_else(|_| DEFAULT_API_VERSION.to_string()),
            api_key: env::var("SWECHA_API_KEY").ok().filter(|k| !k.is_empty()),
            api_token: env::var("KATHALU_API_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| REQUEST_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(REQUEST_TIMEOUT_SECS),
            chunk_size_bytes: env::var("CHUNK_SIZE_BYTES")
                .unwrap_or_else(|_| CHUNK_SIZE_BYTES.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("CHUNK_SIZE_BYTES must be a valid number"))?,
            max_file_size_bytes,
            allowed_extensions,
            app_name: env::var("APP_NAME")
                .unwrap_or_else(|_| "Kathalu - Festival Story Collector".to_string()),
            app_version: env::var("APP_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string()),
            debug: env::var("DEBUG")
                .unwrap_or_else(|_| "false".to_string())
                .to_lowercase()
                .eq("true"),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(anyhow::anyhow!(
                "API_BASE_URL must start with http:// or https://"
            ));
        }

        if self.chunk_size_bytes == 0 {
            return Err(anyhow::anyhow!("CHUNK_SIZE_BYTES must be greater than 0"));
        }

        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }

        if self.allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!("ALLOWED_EXTENSIONS must name at least one extension"));
        }

        Ok(())
    }

    /// API path prefix, e.g. `/api/v1`.
    pub fn api_prefix(&self) -> String {
        format!("/api/{}", self.api_version)
    }

    /// Upload limits enforced by the submission pipeline.
    pub fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy {
            chunk_size: self.chunk_size_bytes,
            max_file_size: Some(self.max_file_size_bytes),
            allowed_extensions: Some(self.allowed_extensions.clone()),
        }
    }
}

/// `MAX_FILE_SIZE_MB` in bytes. Unset means the default; garbage or overflow is an error.
fn parse_max_file_size(raw: Option<&str>) -> Result<u64, anyhow::Error> {
    let mb = match raw.map(str::trim) {
        None | Some("") => DEFAULT_MAX_FILE_SIZE_MB,
        Some(value) => value
            .parse::<u64>()
            .map_err(|_| anyhow::anyhow!("MAX_FILE_SIZE_MB must be a valid number"))?,
    };
    mb.checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("MAX_FILE_SIZE_MB is too large"))
}

/// Comma separated, dots and case ignored. An unset or blank value means the defaults.
fn parse_allowed_extensions(raw: Option<&str>) -> Vec<String> {
    let parsed: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(|e| e.trim().trim_start_matches('.').to_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    if parsed.is_empty() {
        DEFAULT_ALLOWED_EXTENSIONS
            .iter()
            .map(|e| e.to_string())
            .collect()
    } else {
        parsed
    }
}
