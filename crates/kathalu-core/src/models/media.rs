use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::AppError;

/// Media type tag sent with a finalized record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Text,
    Audio,
    Image,
    Video,
}

impl MediaType {
    /// Categories queried, in this order, when collecting a user's contributions.
    pub const CONTRIBUTION_ORDER: [MediaType; 4] = [
        MediaType::Text,
        MediaType::Audio,
        MediaType::Image,
        MediaType::Video,
    ];

    /// Classify a declared MIME type.
    ///
    /// Substring precedence: "audio", then "video", then "image" or "pdf"; anything else
    /// is text. Matching is case-sensitive.
    pub fn from_mime(mime_type: &str) -> Self {
        if mime_type.contains("audio") {
            MediaType::Audio
        } else if mime_type.contains("video") {
            MediaType::Video
        } else if mime_type.contains("image") || mime_type.contains("pdf") {
            MediaType::Image
        } else {
            MediaType::Text
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Text => "text",
            MediaType::Audio => "audio",
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(MediaType::Text),
            "audio" => Ok(MediaType::Audio),
            "image" => Ok(MediaType::Image),
            "video" => Ok(MediaType::Video),
            other => Err(AppError::InvalidInput(format!(
                "Invalid media type: {}. Must be one of: text, audio, image, video",
                other
            ))),
        }
    }
}
