use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use relnotes::enums::ai_provider_error::AiProviderError;
use relnotes::enums::notes_outcome::NotesOutcome;
use relnotes::services::notes_parser::NotesParser;
use relnotes::services::stream_bridge::{drain_to_string, StreamBridge};
use relnotes::structs::stream_item::StreamItem;
use relnotes::traits::ai_provider::AiProvider;

use crate::common::{self, FakeProvider};

const DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

fn bridge_with(provider: Arc<FakeProvider>, batch_size: usize) -> StreamBridge {
    let provider: Arc<dyn AiProvider> = provider;
    StreamBridge::new(provider, batch_size)
}

#[tokio::test]
async fn zero_batches_close_the_stream_immediately_with_no_bytes() {
    let provider = Arc::new(FakeProvider::new(Vec::new()));
    let bridge = bridge_with(Arc::clone(&provider), 8);

    let rx = bridge.open(Vec::new()).unwrap();
    let buffer = timeout(DRAIN_TIMEOUT, drain_to_string(rx)).await.unwrap();

    assert_eq!(buffer, "");
    assert!(provider.events().is_empty(), "no provider call for zero batches");
}

#[tokio::test]
async fn fragments_keep_provider_order_across_sequential_batches() {
    let provider = Arc::new(FakeProvider::new(vec![
        common::fragments(&["alpha", "beta"]),
        common::fragments(&["gamma"]),
    ]));
    let bridge = bridge_with(Arc::clone(&provider), 8);

    let rx = bridge.open(common::records(10)).unwrap();
    let buffer = timeout(DRAIN_TIMEOUT, drain_to_string(rx)).await.unwrap();

    assert_eq!(buffer, format!("alphabeta{}gamma", '\u{1E}'));

    // Batch 2's call must not start before batch 1's stream drained.
    let events = provider.events();
    assert_eq!(
        events,
        vec![
            "call 0".to_string(),
            "frag 0 alpha".to_string(),
            "frag 0 beta".to_string(),
            "call 1".to_string(),
            "frag 1 gamma".to_string(),
        ]
    );
}

#[tokio::test]
async fn batches_partition_the_records_in_order() {
    let provider = Arc::new(FakeProvider::new(vec![
        common::fragments(&["one"]),
        common::fragments(&["two"]),
    ]));
    let bridge = bridge_with(Arc::clone(&provider), 8);

    let rx = bridge.open(common::records(10)).unwrap();
    let _ = timeout(DRAIN_TIMEOUT, drain_to_string(rx)).await.unwrap();

    let prompts = provider.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].contains("[#1]"));
    assert!(prompts[0].contains("[#8]"));
    assert!(!prompts[0].contains("[#9]"));
    assert!(prompts[1].contains("[#9]"));
    assert!(prompts[1].contains("[#10]"));
    assert!(!prompts[1].contains("[#8]"));
}

#[tokio::test]
async fn invalid_batch_size_is_rejected_before_spawning() {
    let provider = Arc::new(FakeProvider::new(Vec::new()));
    let bridge = bridge_with(provider, 0);

    assert!(bridge.open(common::records(3)).is_err());
}

#[tokio::test]
async fn mid_batch_error_closes_the_stream_and_skips_later_batches() {
    let provider = Arc::new(FakeProvider::new(vec![
        Ok(vec![
            Ok(StreamItem::new("alpha".to_string())),
            Err(AiProviderError::ApiError("boom".to_string())),
        ]),
        common::fragments(&["never"]),
    ]));
    let bridge = bridge_with(Arc::clone(&provider), 8);

    let rx = bridge.open(common::records(10)).unwrap();
    let buffer = timeout(DRAIN_TIMEOUT, drain_to_string(rx)).await.unwrap();

    assert_eq!(buffer, "alpha");
    assert!(!provider.events().contains(&"call 1".to_string()));
}

#[tokio::test]
async fn failed_provider_call_still_closes_the_stream() {
    let provider = Arc::new(FakeProvider::new(vec![Err(AiProviderError::NetworkError(
        "connection refused".to_string(),
    ))]));
    let bridge = bridge_with(provider, 8);

    let rx = bridge.open(common::records(2)).unwrap();
    let buffer = timeout(DRAIN_TIMEOUT, drain_to_string(rx)).await.unwrap();

    assert_eq!(buffer, "");
}

#[tokio::test]
async fn completion_item_ends_the_batch() {
    let provider = Arc::new(FakeProvider::new(vec![Ok(vec![
        Ok(StreamItem::new("kept".to_string())),
        Ok(StreamItem::complete(String::new(), Some("stop".to_string()))),
        Ok(StreamItem::new("dropped".to_string())),
    ])]));
    let bridge = bridge_with(provider, 8);

    let rx = bridge.open(common::records(1)).unwrap();
    let buffer = timeout(DRAIN_TIMEOUT, drain_to_string(rx)).await.unwrap();

    assert_eq!(buffer, "kept");
}

#[tokio::test]
async fn end_to_end_two_batches_reconcile_into_merged_notes() {
    let provider = Arc::new(FakeProvider::new(vec![
        common::fragments(&["[{\"id\":\"1\",\"developerNote\":\"d1\",\"marketingNote\":\"m1\"}]"]),
        common::fragments(&["[{\"id\":\"9\",\"developerNote\":\"d9\",\"marketingNote\":\"m9\"}]"]),
    ]));
    let bridge = bridge_with(Arc::clone(&provider), 8);

    let rx = bridge.open(common::records(10)).unwrap();
    let buffer = timeout(DRAIN_TIMEOUT, drain_to_string(rx)).await.unwrap();

    // Exactly the two provider payloads with one boundary byte between.
    let expected = format!(
        "[{{\"id\":\"1\",\"developerNote\":\"d1\",\"marketingNote\":\"m1\"}}]{}[{{\"id\":\"9\",\"developerNote\":\"d9\",\"marketingNote\":\"m9\"}}]",
        '\u{1E}'
    );
    assert_eq!(buffer, expected);

    match NotesParser::reconcile(&buffer) {
        NotesOutcome::Parsed(notes) => {
            assert_eq!(notes.len(), 2);
            assert_eq!(notes[0].id, "1");
            assert_eq!(notes[1].id, "9");
        }
        other => panic!("expected Parsed, got {:?}", other),
    }
}
