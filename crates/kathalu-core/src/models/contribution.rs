use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::media::MediaType;

/// Contribution as returned by the corpus service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub location: Option<RawLocation>,
    #[serde(default)]
    pub media_type: Option<MediaType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLocation {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Body of the per-media-type contributions endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContributionsResponse {
    #[serde(default)]
    pub contributions: Vec<ContributionRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// A previously submitted record, as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub id: String,
    pub title: String,
    /// Parsed timestamp; `None` when the service sent none or an unparseable one.
    pub timestamp: Option<DateTime<Utc>>,
    pub location: Option<Location>,
    pub media_type: MediaType,
}

impl ContributionRecord {
    /// Parse once at the boundary. `fetched_as` is the category the record was listed under
    /// and is used when the record does not name its own media type.
    pub fn into_contribution(self, fetched_as: MediaType) -> Contribution {
        let location = self.location.and_then(|loc| match (loc.latitude, loc.longitude) {
            (Some(latitude), Some(longitude)) => Some(Location {
                latitude,
                longitude,
            }),
            _ => None,
        });

        Contribution {
            id: self.id,
            title: self
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| "Unknown Festival Story".to_string()),
            timestamp: self.timestamp.as_deref().and_then(parse_timestamp),
            location,
            media_type: self.media_type.unwrap_or(fetched_as),
        }
    }
}

/// Parse an ISO-8601 timestamp. Values without an offset are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_timestamp_variants() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-01-01T00:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01T05:30:00+05:30"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01T00:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01T00:00:00.000"), Some(expected));
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_into_contribution_defaults() {
        let record: ContributionRecord = serde_json::from_value(serde_json::json!({
            "id": "c-1",
            "location": { "latitude": 17.3, "longitude": null }
        }))
        .unwrap();
        let contribution = record.into_contribution(MediaType::Audio);
        assert_eq!(contribution.title, "Unknown Festival Story");
        assert_eq!(contribution.media_type, MediaType::Audio);
        assert!(contribution.location.is_none());
        assert!(contribution.timestamp.is_none());
    }

    #[test]
    fn test_into_contribution_full() {
        let record: ContributionRecord = serde_json::from_value(serde_json::json!({
            "id": "c-2",
            "title": "Sankranti kites",
            "timestamp": "2024-06-01T00:00:00Z",
            "location": { "latitude": 17.3, "longitude": 78.4 },
            "media_type": "image"
        }))
        .unwrap();
        let contribution = record.into_contribution(MediaType::Text);
        assert_eq!(contribution.media_type, MediaType::Image);
        assert_eq!(
            contribution.location,
            Some(Location {
                latitude: 17.3,
                longitude: 78.4
            })
        );
        assert!(contribution.timestamp.is_some());
    }

    #[test]
    fn test_response_without_contributions_key() {
        let response: ContributionsResponse = serde_json::from_str("{}").unwrap();
        assert!(response.contributions.is_empty());
    }
}
