//! Dashboard view of a user's contributions across media types.

use std::cmp::Ordering;

use kathalu_core::models::{Contribution, MediaType};
use kathalu_core::Transport;

/// Fetches a user's contributions for every media type and merges them, newest first.
pub struct ContributionAggregator<'a, T: Transport + ?Sized> {
    transport: &'a T,
}

impl<'a, T: Transport + ?Sized> ContributionAggregator<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Collect contributions of `user_id`, sorted by timestamp descending.
    ///
    /// Entries without a timestamp sort last. A media type the service has nothing for,
    /// or fails to answer for, contributes no entries; an empty result is not an error.
    pub async fn fetch_all(&self, user_id: &str) -> Vec<Contribution> {
        if user_id.trim().is_empty() {
            return Vec::new();
        }

        let mut contributions = Vec::new();
        for media_type in MediaType::CONTRIBUTION_ORDER {
            match self
                .transport
                .fetch_user_contributions(user_id, media_type)
                .await
            {
                Ok(Some(response)) => {
                    tracing::debug!(
                        user_id = %user_id,
                        media_type = %media_type,
                        count = response.contributions.len(),
                        "Fetched contributions"
                    );
                    contributions.extend(
                        response
                            .contributions
                            .into_iter()
                            .map(|record| record.into_contribution(media_type)),
                    );
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(
                        user_id = %user_id,
                        media_type = %media_type,
                        error = %e,
                        "Failed to fetch contributions"
                    );
                }
            }
        }

        sort_newest_first(&mut contributions);
        contributions
    }
}

/// Stable sort by timestamp descending; missing timestamps go to the end.
pub fn sort_newest_first(contributions: &mut [Contribution]) {
    contributions.sort_by(|a, b| match (&a.timestamp, &b.timestamp) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use kathalu_core::models::parse_timestamp;

    fn contribution(id: &str, timestamp: Option<&str>) -> Contribution {
        Contribution {
            id: id.to_string(),
            title: id.to_string(),
            timestamp: timestamp.and_then(parse_timestamp),
            location: None,
            media_type: MediaType::Text,
        }
    }

    #[test]
    fn test_sort_newest_first_missing_last() {
        let mut items = vec![
            contribution("none", None),
            contribution("jan", Some("2024-01-01T00:00:00Z")),
            contribution("jun", Some("2024-06-01T00:00:00Z")),
        ];
        sort_newest_first(&mut items);
        let ids: Vec<_> = items.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["jun", "jan", "none"]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let mut items = vec![
            contribution("a", None),
            contribution("b", Some("2024-01-01T00:00:00Z")),
            contribution("c", None),
            contribution("d", Some("2024-01-01T00:00:00Z")),
        ];
        sort_newest_first(&mut items);
        let ids: Vec<_> = items.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "a", "c"]);
    }
}
