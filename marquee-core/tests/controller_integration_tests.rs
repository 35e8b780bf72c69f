//! End-to-end tests driving the query controller actor through its handle
//! with a scripted metadata provider.

use std::sync::Arc;
use std::time::Duration;

use marquee_core::controller::SearchSnapshot;
use marquee_core::{
    KeywordPicker, MarqueeConfig, MediaTypeFilter, MockMetadataProvider, SearchError, SearchMode,
    ViewportMetrics, spawn_query_controller,
};

const DEBOUNCE: Duration = Duration::from_millis(50);

fn fast_config() -> MarqueeConfig {
    let mut config = MarqueeConfig::default();
    config.search.debounce_delay = DEBOUNCE;
    config
}

/// Polls the controller until no debounce is armed and no fetch is
/// outstanding.
async fn settle(handle: &marquee_core::QueryControllerHandle) -> SearchSnapshot {
    for _ in 0..200 {
        let snapshot = handle.snapshot().await.unwrap();
        if snapshot.is_settled() {
            return snapshot;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("controller never settled");
}

/// Polls the controller until a fetch is in flight.
async fn wait_for_loading(handle: &marquee_core::QueryControllerHandle) {
    for _ in 0..200 {
        let snapshot = handle.snapshot().await.unwrap();
        if snapshot.loading {
            return;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    panic!("fetch never started");
}

#[tokio::test]
async fn test_search_query_end_to_end() {
    let provider = Arc::new(MockMetadataProvider::new());
    provider.push_page(MockMetadataProvider::sample_page("love", 1, 10, 20));
    provider.push_page(MockMetadataProvider::sample_page("batman", 1, 10, 42));

    let handle = spawn_query_controller(fast_config(), provider.clone());
    settle(&handle).await;

    handle.set_query_text("batman").await.unwrap();
    let snapshot = settle(&handle).await;

    assert_eq!(snapshot.mode, SearchMode::Search);
    assert_eq!(snapshot.results.len(), 10);
    assert_eq!(snapshot.total_pages, 5);
    assert_eq!(snapshot.page, 1);
    assert!(snapshot.error.is_none());

    let requests = provider.recorded_requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].effective_query, "batman");
    assert_eq!(requests[1].page, 1);
    assert!(!requests[1].append);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_scroll_pagination_appends_in_order() {
    let provider = Arc::new(MockMetadataProvider::new());
    provider.push_page(MockMetadataProvider::sample_page("love", 1, 10, 20));
    provider.push_page(MockMetadataProvider::sample_page("batman", 1, 10, 42));
    provider.push_page(MockMetadataProvider::sample_page("batman", 2, 10, 42));

    let handle = spawn_query_controller(fast_config(), provider.clone());
    settle(&handle).await;
    handle.set_query_text("batman").await.unwrap();
    settle(&handle).await;

    let advanced = handle
        .report_scroll(ViewportMetrics::at_bottom(2000, 600))
        .await
        .unwrap();
    assert!(advanced);

    let snapshot = settle(&handle).await;
    assert_eq!(snapshot.results.len(), 20);
    assert_eq!(snapshot.page, 2);
    assert_eq!(snapshot.total_pages, 5);

    // Arrival order preserved: page 1 entries before page 2 entries.
    let titles: Vec<&str> = snapshot.results.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles[0], "batman 1");
    assert_eq!(titles[9], "batman 10");
    assert_eq!(titles[10], "batman 11");
    assert_eq!(titles[19], "batman 20");

    let requests = provider.recorded_requests();
    assert_eq!(requests[2].effective_query, "batman");
    assert_eq!(requests[2].page, 2);
    assert!(requests[2].append);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_not_found_query_surfaces_service_message() {
    let provider = Arc::new(MockMetadataProvider::new());
    provider.push_page(MockMetadataProvider::sample_page("love", 1, 10, 20));
    // Script exhausted afterwards: the mock answers "Movie not found!".

    let handle = spawn_query_controller(fast_config(), provider);
    settle(&handle).await;

    handle.set_query_text("zzzzzznotfound").await.unwrap();
    let snapshot = settle(&handle).await;

    assert!(snapshot.results.is_empty());
    assert_eq!(snapshot.error.as_deref(), Some("Movie not found!"));
    assert_eq!(snapshot.total_pages, 1);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_typing_burst_debounces_to_single_fetch_with_last_value() {
    let provider = Arc::new(MockMetadataProvider::new());
    provider.push_page(MockMetadataProvider::sample_page("love", 1, 10, 20));
    provider.push_page(MockMetadataProvider::sample_page("bat", 1, 10, 15));

    let handle = spawn_query_controller(fast_config(), provider.clone());
    settle(&handle).await;

    handle.set_query_text("b").await.unwrap();
    handle.set_query_text("ba").await.unwrap();
    handle.set_query_text("bat").await.unwrap();
    let snapshot = settle(&handle).await;
    assert_eq!(snapshot.query_text, "bat");

    // Give any superseded timer a chance to misfire before counting.
    tokio::time::sleep(DEBOUNCE * 3).await;

    let requests = provider.recorded_requests();
    assert_eq!(requests.len(), 2, "one initial + one debounced fetch");
    assert_eq!(requests[1].effective_query, "bat");

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_scroll_suppressed_while_loading_and_on_last_page() {
    let provider = Arc::new(MockMetadataProvider::new());
    provider.push_page(MockMetadataProvider::sample_page("love", 1, 10, 42));
    provider.push_page_delayed(
        MockMetadataProvider::sample_page("love", 2, 10, 42),
        Duration::from_millis(80),
    );

    let handle = spawn_query_controller(fast_config(), provider.clone());
    settle(&handle).await;

    // First signal advances; the second lands mid-fetch and is ignored.
    let bottom = ViewportMetrics::at_bottom(2000, 600);
    assert!(handle.report_scroll(bottom).await.unwrap());
    assert!(!handle.report_scroll(bottom).await.unwrap());

    let snapshot = settle(&handle).await;
    assert_eq!(snapshot.results.len(), 20);
    assert_eq!(provider.request_count(), 2);

    // Exhausted pagination: single-page result set never advances.
    provider.push_page(MockMetadataProvider::sample_page("moon", 1, 5, 5));
    handle.set_query_text("moon").await.unwrap();
    settle(&handle).await;
    assert!(!handle.report_scroll(bottom).await.unwrap());

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_stale_response_never_overwrites_newer_state() {
    let provider = Arc::new(MockMetadataProvider::new());
    provider.push_page(MockMetadataProvider::sample_page("love", 1, 10, 20));
    provider.push_page_delayed(
        MockMetadataProvider::sample_page("aaa", 1, 10, 30),
        Duration::from_millis(200),
    );
    provider.push_page(MockMetadataProvider::sample_page("bbb", 1, 10, 40));

    let handle = spawn_query_controller(fast_config(), provider.clone());
    settle(&handle).await;

    handle.set_query_text("aaa").await.unwrap();
    wait_for_loading(&handle).await;
    handle.set_query_text("bbb").await.unwrap();

    let snapshot = settle(&handle).await;
    assert_eq!(snapshot.total_pages, 4);
    assert_eq!(snapshot.results[0].title, "bbb 1");

    // Let the superseded response arrive; it must be discarded.
    tokio::time::sleep(Duration::from_millis(250)).await;
    let snapshot = settle(&handle).await;
    assert_eq!(snapshot.total_pages, 4);
    assert_eq!(snapshot.results[0].title, "bbb 1");
    assert!(!snapshot.loading);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_filter_change_refetches_immediately_with_filters() {
    let provider = Arc::new(MockMetadataProvider::new());
    provider.push_page(MockMetadataProvider::sample_page("love", 1, 10, 20));
    provider.push_page(MockMetadataProvider::sample_page("batman", 1, 10, 42));
    provider.push_page(MockMetadataProvider::sample_page("batman", 1, 10, 12));

    let handle = spawn_query_controller(fast_config(), provider.clone());
    settle(&handle).await;
    handle.set_query_text("batman").await.unwrap();
    settle(&handle).await;

    handle
        .set_media_type(Some(MediaTypeFilter::Movie))
        .await
        .unwrap();
    let snapshot = settle(&handle).await;
    assert_eq!(snapshot.page, 1);
    assert_eq!(snapshot.total_pages, 2);

    let requests = provider.recorded_requests();
    assert_eq!(requests.len(), 3);
    // Filter change bypasses the debounce: it reuses the typed query at
    // page 1 with the new filter attached.
    assert_eq!(requests[2].effective_query, "batman");
    assert_eq!(requests[2].page, 1);
    assert_eq!(requests[2].filters.media_type, Some(MediaTypeFilter::Movie));
    assert!(!requests[2].append);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_filter_change_in_discovery_mode_redraws_keyword() {
    let provider = Arc::new(MockMetadataProvider::new());
    provider.push_page(MockMetadataProvider::sample_page("love", 1, 10, 20));
    provider.push_page(MockMetadataProvider::sample_page("love", 1, 10, 20));

    let handle = spawn_query_controller(fast_config(), provider.clone());
    settle(&handle).await;

    handle.set_year(Some("2020".to_string())).await.unwrap();
    settle(&handle).await;

    let requests = provider.recorded_requests();
    assert_eq!(requests.len(), 2);
    assert!(KeywordPicker::contains(&requests[1].effective_query));
    assert_eq!(requests[1].filters.year.as_deref(), Some("2020"));

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_clear_resets_and_issues_fresh_discovery_fetch() {
    let provider = Arc::new(MockMetadataProvider::new());
    provider.push_page(MockMetadataProvider::sample_page("love", 1, 10, 20));
    provider.push_page(MockMetadataProvider::sample_page("batman", 1, 10, 42));
    provider.push_page(MockMetadataProvider::sample_page("star", 1, 10, 20));

    let handle = spawn_query_controller(fast_config(), provider.clone());
    settle(&handle).await;
    handle.set_query_text("batman").await.unwrap();
    settle(&handle).await;

    handle.clear().await.unwrap();
    let snapshot = settle(&handle).await;

    assert!(snapshot.query_text.is_empty());
    assert_eq!(snapshot.mode, SearchMode::Discovery);
    assert_eq!(snapshot.page, 1);
    assert!(snapshot.error.is_none());
    assert_eq!(snapshot.results.len(), 10);

    let requests = provider.recorded_requests();
    let last = requests.last().unwrap();
    assert!(KeywordPicker::contains(&last.effective_query));
    assert_ne!(last.effective_query, "batman");
    assert_eq!(last.page, 1);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_transport_failure_during_append_keeps_pages_visible() {
    let provider = Arc::new(MockMetadataProvider::new());
    provider.push_page(MockMetadataProvider::sample_page("love", 1, 10, 42));
    provider.push_error(SearchError::Network {
        reason: "connection reset".to_string(),
    });

    let handle = spawn_query_controller(fast_config(), provider);
    settle(&handle).await;

    assert!(
        handle
            .report_scroll(ViewportMetrics::at_bottom(2000, 600))
            .await
            .unwrap()
    );
    let snapshot = settle(&handle).await;

    assert_eq!(snapshot.results.len(), 10);
    assert_eq!(snapshot.error.as_deref(), Some("Failed to fetch movies"));

    handle.shutdown().await.unwrap();
}
