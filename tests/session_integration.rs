use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use std::time::Duration;

use pagesel::{
    FetchError, InMemoryPageClient, Item, SelectionConfig, SelectionSession, SelectionStore,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

fn session_with(client: Arc<InMemoryPageClient>, max_concurrent_fetches: usize) -> SelectionSession {
    let config = SelectionConfig {
        max_concurrent_fetches,
        ..SelectionConfig::default()
    };
    SelectionSession::builder(config)
        .client(client)
        .build()
        .expect("session should build")
}

#[tokio::test]
async fn test_bulk_selection_survives_pagination_and_toggles() {
    init_tracing();
    let client = Arc::new(InMemoryPageClient::with_sequential_ids(120, 12));
    let session = session_with(client, 4);

    let result = session.request_bulk_selection(30).await.unwrap();
    assert_eq!(result.added_ids, (1..=30).collect::<HashSet<_>>());

    let page = session.on_page_navigate(36, 12).await.unwrap();
    assert_eq!(page.page_number, 4);
    assert_eq!(session.current_page(), 4);

    // selecting a row on page 4 and unselecting one from the bulk range
    assert!(session.toggle_row(40));
    assert!(!session.toggle_row(7));

    let page = session.on_page_navigate(0, 12).await.unwrap();
    let selected_on_first_page: Vec<u64> = page
        .ids()
        .into_iter()
        .filter(|id| session.is_selected(*id))
        .collect();
    assert_eq!(selected_on_first_page.len(), 11);
    assert!(session.is_selected(40));
    assert_eq!(session.selection_len(), 30);
}

#[tokio::test]
async fn test_partial_failure_keeps_earlier_selection() {
    init_tracing();
    let client = Arc::new(InMemoryPageClient::with_sequential_ids(120, 12));
    let session = session_with(client.clone(), 2);

    session.request_bulk_selection(5).await.unwrap();
    assert_eq!(session.selection_len(), 5);

    client.fail_page(1, FetchError::Status {
        status: 502,
        message: "bad gateway".into(),
    });
    client.fail_page(2, FetchError::Timeout);

    let result = session.request_bulk_selection(36).await.unwrap();
    assert_eq!(result.failed_pages, BTreeSet::from([1, 2]));
    assert_eq!(result.added_ids, (25..=36).collect::<HashSet<_>>());
    // earlier ids from page 1 are never rolled back
    assert!((1..=5).all(|id| session.is_selected(id)));
    assert_eq!(session.selection_len(), 17);
}

#[tokio::test]
async fn test_retry_after_failure_fills_gap() {
    let client = Arc::new(InMemoryPageClient::with_sequential_ids(120, 12));
    client.fail_page(2, FetchError::Network("reset by peer".into()));
    let session = session_with(client.clone(), 4);

    let first = session.request_bulk_selection(25).await.unwrap();
    assert_eq!(first.failed_pages, BTreeSet::from([2]));

    client.clear_failures();
    let second = session.request_bulk_selection(25).await.unwrap();
    assert!(second.failed_pages.is_empty());
    assert_eq!(second.added_ids, (13..=24).collect::<HashSet<_>>());
    assert_eq!(session.selection_len(), 25);
}

#[tokio::test]
async fn test_collection_shrinking_between_requests() {
    let client = Arc::new(InMemoryPageClient::with_sequential_ids(48, 12));
    let session = session_with(client.clone(), 4);

    session.on_page_navigate(0, 12).await.unwrap();
    assert_eq!(session.pagination_state().total_count, Some(48));

    client.replace_items((1..=30).map(Item::with_id).collect());
    let result = session.request_bulk_selection(48).await.unwrap();
    assert_eq!(result.added_ids.len(), 30);
    assert_eq!(result.dropped_count, 18);
    assert!(result.failed_pages.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_manual_deselect_holds_during_concurrent_bulk() {
    init_tracing();
    let client = Arc::new(
        InMemoryPageClient::with_sequential_ids(600, 12).with_delay(Duration::from_millis(5)),
    );
    let store = Arc::new(SelectionStore::new());
    store.add([10_000]);

    let config = SelectionConfig::default();
    let session = Arc::new(
        SelectionSession::builder(config)
            .client(client)
            .store(Arc::clone(&store))
            .build()
            .unwrap(),
    );

    let bulk = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.request_bulk_selection(600).await })
    };
    tokio::time::sleep(Duration::from_millis(2)).await;
    store.remove(10_000);

    let result = bulk.await.unwrap().unwrap();
    assert_eq!(result.added_ids.len(), 600);
    assert!(!store.contains(10_000));
    assert_eq!(store.len(), 600);
}

#[tokio::test]
async fn test_newer_bulk_request_supersedes_older() {
    let client = Arc::new(
        InMemoryPageClient::with_sequential_ids(120, 12).with_delay(Duration::from_millis(40)),
    );
    let session = session_with(client, 4);

    let (older, newer) = tokio::join!(session.request_bulk_selection(60), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        session.request_bulk_selection(5).await
    });
    let older = older.unwrap();
    let newer = newer.unwrap();

    assert!(older.superseded);
    assert!(!newer.superseded);
    assert_eq!(session.selection_snapshot(), (1..=5).collect::<HashSet<_>>());
}
