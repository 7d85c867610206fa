mod common;

use chrono::{TimeZone, Utc};
use common::{record, Call, ScriptedTransport};
use kathalu_core::models::{ContributionRecord, MediaType, RawLocation};
use kathalu_services::ContributionAggregator;

#[tokio::test]
async fn merges_media_types_newest_first() {
    let transport = ScriptedTransport::new()
        .with_contributions(MediaType::Text, vec![record("t1", None)])
        .with_contributions(
            MediaType::Audio,
            vec![record("a1", Some("2024-01-01T00:00:00Z"))],
        )
        .with_contributions(
            MediaType::Video,
            vec![record("v1", Some("2024-06-01T00:00:00Z"))],
        );

    let contributions = ContributionAggregator::new(&transport)
        .fetch_all("user-42")
        .await;

    let ids: Vec<_> = contributions.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["v1", "a1", "t1"]);
    assert_eq!(contributions[0].media_type, MediaType::Video);
    assert_eq!(
        contributions[0].timestamp,
        Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
    );
    assert!(contributions[2].timestamp.is_none());
}

#[tokio::test]
async fn queries_every_media_type_in_order() {
    let transport = ScriptedTransport::new();

    let contributions = ContributionAggregator::new(&transport)
        .fetch_all("user-42")
        .await;

    assert!(contributions.is_empty());
    let fetched: Vec<_> = transport
        .calls()
        .into_iter()
        .map(|c| match c {
            Call::Fetch {
                user_id,
                media_type,
            } => {
                assert_eq!(user_id, "user-42");
                media_type
            }
            other => panic!("unexpected call {:?}", other),
        })
        .collect();
    assert_eq!(
        fetched,
        vec![
            MediaType::Text,
            MediaType::Audio,
            MediaType::Image,
            MediaType::Video
        ]
    );
}

#[tokio::test]
async fn failing_media_type_is_skipped() {
    let transport = ScriptedTransport::new()
        .with_contributions(MediaType::Image, vec![record("i1", Some("2023-03-08"))])
        .fail_fetch(MediaType::Audio)
        .with_contributions(MediaType::Audio, vec![record("a1", None)]);

    let contributions = ContributionAggregator::new(&transport)
        .fetch_all("user-42")
        .await;

    let ids: Vec<_> = contributions.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["i1"]);
}

#[tokio::test]
async fn blank_user_id_makes_no_calls() {
    let transport = ScriptedTransport::new()
        .with_contributions(MediaType::Text, vec![record("t1", None)]);

    let contributions = ContributionAggregator::new(&transport).fetch_all("  ").await;

    assert!(contributions.is_empty());
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn record_defaults_are_applied() {
    let untitled = ContributionRecord {
        id: "x".to_string(),
        title: None,
        timestamp: Some("not a date".to_string()),
        location: Some(RawLocation {
            latitude: Some(16.5),
            longitude: None,
        }),
        media_type: None,
    };
    let transport =
        ScriptedTransport::new().with_contributions(MediaType::Audio, vec![untitled]);

    let contributions = ContributionAggregator::new(&transport)
        .fetch_all("user-42")
        .await;

    assert_eq!(contributions.len(), 1);
    let item = &contributions[0];
    assert_eq!(item.title, "Unknown Festival Story");
    assert!(item.timestamp.is_none());
    assert!(item.location.is_none());
    assert_eq!(item.media_type, MediaType::Audio);
}
