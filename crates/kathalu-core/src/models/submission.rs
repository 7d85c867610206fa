use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::MIN_STORY_TEXT_CHARS;
use crate::AppError;

/// Who holds the rights to the submitted work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseRights {
    /// Created by the contributor, free for anyone to use.
    Creator,
    /// Created by family or friends, uploaded with their permission.
    FamilyOrFriend,
    /// Downloaded from the internet, sharing terms unknown.
    Downloaded,
}

impl ReleaseRights {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseRights::Creator => "creator",
            ReleaseRights::FamilyOrFriend => "family_or_friend",
            ReleaseRights::Downloaded => "downloaded",
        }
    }
}

impl fmt::Display for ReleaseRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ReleaseRights {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "creator" => Ok(ReleaseRights::Creator),
            "family_or_friend" => Ok(ReleaseRights::FamilyOrFriend),
            "downloaded" => Ok(ReleaseRights::Downloaded),
            other => Err(AppError::InvalidInput(format!(
                "Invalid release rights: {}. Must be one of: creator, family_or_friend, downloaded",
                other
            ))),
        }
    }
}

/// Story language as understood by the corpus service.
///
/// The service only distinguishes a few codes; English and other languages travel as `NA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "telugu")]
    Telugu,
    #[serde(rename = "hindi")]
    Hindi,
    #[serde(rename = "NA")]
    NotApplicable,
}

impl Language {
    /// Wire code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Telugu => "telugu",
            Language::Hindi => "hindi",
            Language::NotApplicable => "NA",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.code())
    }
}

impl FromStr for Language {
    type Err = AppError;

    /// Accepts display names (Telugu, Hindi, English, Other) and wire codes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "telugu" => Ok(Language::Telugu),
            "hindi" => Ok(Language::Hindi),
            "english" | "other" | "na" => Ok(Language::NotApplicable),
            "" => Err(AppError::InvalidInput(
                "Please select a valid language".to_string(),
            )),
            other => Err(AppError::InvalidInput(format!(
                "Invalid language: {}. Must be one of: Telugu, Hindi, English, Other",
                other
            ))),
        }
    }
}

/// Metadata shared by every finalize call of one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SubmissionMetadata {
    #[validate(length(min = 1, message = "Story title is required"))]
    pub title: String,
    /// Description sent with each record (the combined story text).
    #[validate(length(
        min = 32,
        message = "Description must be at least 32 characters long"
    ))]
    pub description: String,
    #[validate(length(
        min = 32,
        message = "Full festival story must be at least 32 characters long"
    ))]
    pub full_story_text: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category_id: String,
    pub release_rights: ReleaseRights,
    pub language: Language,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[validate(length(min = 1, message = "User ID is required"))]
    pub user_id: String,
}

impl SubmissionMetadata {
    /// Full precondition check run before any network call.
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()?;

        if let Some(lat) = self.latitude {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(AppError::InvalidInput(format!(
                    "Latitude {} must be between -90 and 90",
                    lat
                )));
            }
        }
        if let Some(lon) = self.longitude {
            if !(-180.0..=180.0).contains(&lon) {
                return Err(AppError::InvalidInput(format!(
                    "Longitude {} must be between -180 and 180",
                    lon
                )));
            }
        }

        Ok(())
    }
}

/// What a contributor typed into the story form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoryDraft {
    pub title: String,
    pub description: String,
    pub full_story: String,
    pub category_id: String,
    pub release_rights: Option<ReleaseRights>,
    pub language: Option<Language>,
    pub festival_name: Option<String>,
    pub region: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl StoryDraft {
    /// Text stored as the record description: title, brief description and full story,
    /// followed by the optional festival name and region.
    pub fn combined_description(&self) -> String {
        let mut combined = format!(
            "Festival Story: {}\n\nBrief Description: {}\n\nFull Story: {}",
            self.title, self.description, self.full_story
        );
        if let Some(festival) = non_empty(&self.festival_name) {
            combined.push_str(&format!("\n\nFestival Name: {}", festival));
        }
        if let Some(region) = non_empty(&self.region) {
            combined.push_str(&format!("\nRegion: {}", region));
        }
        combined
    }

    /// Validate the draft and turn it into submission metadata for `user_id`.
    pub fn into_metadata(self, user_id: impl Into<String>) -> Result<SubmissionMetadata, AppError> {
        let user_id = user_id.into();
        if user_id.trim().is_empty() {
            return Err(AppError::Unauthorized(
                "User ID not found. Please log in".to_string(),
            ));
        }

        let (release_rights, language) = match (self.release_rights, self.language) {
            (Some(rights), Some(language))
                if !self.title.trim().is_empty()
                    && !self.description.trim().is_empty()
                    && !self.full_story.trim().is_empty()
                    && !self.category_id.trim().is_empty() =>
            {
                (rights, language)
            }
            _ => {
                return Err(AppError::InvalidInput(
                    "Please fill in all required fields".to_string(),
                ))
            }
        };

        check_min_chars("Brief description", &self.description)?;
        check_min_chars("Full festival story", &self.full_story)?;

        let metadata = SubmissionMetadata {
            description: self.combined_description(),
            title: self.title,
            full_story_text: self.full_story,
            category_id: self.category_id,
            release_rights,
            language,
            latitude: self.latitude,
            longitude: self.longitude,
            user_id,
        };
        metadata.check()?;
        Ok(metadata)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn check_min_chars(field: &str, value: &str) -> Result<(), AppError> {
    if (value.chars().count() as u64) < MIN_STORY_TEXT_CHARS {
        return Err(AppError::InvalidInput(format!(
            "{} must be at least {} characters long",
            field, MIN_STORY_TEXT_CHARS
        )));
    }
    Ok(())
}
