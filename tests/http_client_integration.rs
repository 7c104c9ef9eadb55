use std::collections::{BTreeSet, HashSet};

use mockito::{Matcher, Server, ServerGuard};
use pagesel::{SelectionConfig, SelectionError, SelectionSession};

const PAGE_SIZE: u64 = 3;
const TOTAL: u64 = 8;

fn page_body(page: u64) -> String {
    let start = (page - 1) * PAGE_SIZE + 1;
    let end = (page * PAGE_SIZE).min(TOTAL);
    let data: Vec<serde_json::Value> = (start..=end)
        .map(|id| {
            serde_json::json!({
                "id": id,
                "title": format!("Artwork {}", id),
                "place_of_origin": null,
                "artist_display": "Unknown",
                "inscriptions": null,
                "date_start": 1900,
                "date_end": 1901
            })
        })
        .collect();
    serde_json::json!({
        "data": data,
        "pagination": {
            "total": TOTAL,
            "limit": PAGE_SIZE,
            "offset": (page - 1) * PAGE_SIZE,
            "total_pages": TOTAL.div_ceil(PAGE_SIZE),
            "current_page": page
        }
    })
    .to_string()
}

async fn mock_page(server: &mut ServerGuard, page: u64) -> mockito::Mock {
    server
        .mock("GET", "/api/v1/artworks")
        .match_query(Matcher::UrlEncoded("page".into(), page.to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page_body(page))
        .create_async()
        .await
}

fn session_for(server: &ServerGuard) -> SelectionSession {
    let config = SelectionConfig {
        page_size: PAGE_SIZE,
        max_concurrent_fetches: 2,
        ..SelectionConfig::with_base_url(format!("{}/api/v1/artworks", server.url()))
    };
    SelectionSession::builder(config).build().unwrap()
}

#[tokio::test]
async fn test_bulk_selection_over_http() {
    let mut server = Server::new_async().await;
    let page1 = mock_page(&mut server, 1).await;
    let page2 = mock_page(&mut server, 2).await;
    let page3 = mock_page(&mut server, 3).await;

    let session = session_for(&server);
    let result = session.request_bulk_selection(7).await.unwrap();

    assert_eq!(result.added_ids, (1..=7).collect::<HashSet<_>>());
    assert!(result.failed_pages.is_empty());
    page1.assert_async().await;
    page2.assert_async().await;
    page3.assert_async().await;
}

#[tokio::test]
async fn test_server_error_and_bad_body_are_page_scoped() {
    let mut server = Server::new_async().await;
    let _page1 = mock_page(&mut server, 1).await;
    let _page2 = server
        .mock("GET", "/api/v1/artworks")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;
    let _page3 = server
        .mock("GET", "/api/v1/artworks")
        .match_query(Matcher::UrlEncoded("page".into(), "3".into()))
        .with_status(200)
        .with_body(r#"{"data": "#)
        .create_async()
        .await;

    let session = session_for(&server);
    let result = session.request_bulk_selection(8).await.unwrap();

    assert_eq!(result.failed_pages, BTreeSet::from([2, 3]));
    assert_eq!(result.added_ids, HashSet::from([1, 2, 3]));
}

#[tokio::test]
async fn test_navigation_over_http() {
    let mut server = Server::new_async().await;
    let page3 = mock_page(&mut server, 3).await;

    let session = session_for(&server);
    let page = session.on_page_navigate(6, 3).await.unwrap();

    assert_eq!(page.page_number, 3);
    assert_eq!(page.ids(), vec![7, 8]);
    assert_eq!(page.items[0].title.as_deref(), Some("Artwork 7"));
    assert_eq!(session.pagination_state().total_pages(), Some(3));
    page3.assert_async().await;
}

#[tokio::test]
async fn test_navigation_error_status_surfaces() {
    let mut server = Server::new_async().await;
    let _missing = server
        .mock("GET", "/api/v1/artworks")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body("not found")
        .create_async()
        .await;

    let session = session_for(&server);
    let err = session.on_page_navigate(0, 3).await.unwrap_err();
    match err {
        SelectionError::Fetch(fetch) => assert!(fetch.is_network()),
        other => panic!("unexpected error: {other}"),
    }
}
