//! Collection client against a mock API

mod common;

use common::*;
use kodegen_tools_artexplorer::{
    CancellationHandle, CollectionClient, ExplorerError, ObjectId, SearchQuery, YearBounds,
};
use mockito::Matcher;
use std::time::Duration;
use tokio::net::TcpListener;

fn query(text: &str, min_year: i32, max_year: i32) -> SearchQuery {
    SearchQuery::new(text, min_year, max_year, YearBounds::default()).unwrap()
}

#[tokio::test]
async fn search_sends_filters_and_returns_ids_in_order() {
    let mut server = setup_mock_server().await;
    let search = server
        .mock("GET", SEARCH_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("hasImages".into(), "true".into()),
            Matcher::UrlEncoded("isHighlight".into(), "true".into()),
            Matcher::UrlEncoded("dateBegin".into(), "1800".into()),
            Matcher::UrlEncoded("dateEnd".into(), "1900".into()),
            Matcher::UrlEncoded("q".into(), "irises".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"total":3,"objectIDs":[436528,437980,436535]}"#)
        .create_async()
        .await;

    let client = CollectionClient::new(config_for(&server)).unwrap();
    let ids = client
        .search(&query("irises", 1800, 1900), &CancellationHandle::new())
        .await
        .unwrap();

    assert_eq!(ids, vec![ObjectId(436528), ObjectId(437980), ObjectId(436535)]);
    search.assert_async().await;
}

#[tokio::test]
async fn tag_queries_set_tags_flag() {
    let mut server = setup_mock_server().await;
    let search = server
        .mock("GET", SEARCH_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("tags".into(), "true".into()),
            Matcher::UrlEncoded("q".into(), "Dogs".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"total":1,"objectIDs":[1]}"#)
        .create_async()
        .await;

    let client = CollectionClient::new(config_for(&server)).unwrap();
    client
        .search(&query("Dogs", 1500, 1600), &CancellationHandle::new())
        .await
        .unwrap();

    search.assert_async().await;
}

#[tokio::test]
async fn out_of_range_years_are_clamped_before_sending() {
    let mut server = setup_mock_server().await;
    let search = server
        .mock("GET", SEARCH_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("dateBegin".into(), "-2000".into()),
            Matcher::UrlEncoded("dateEnd".into(), "2000".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"total":0,"objectIDs":null}"#)
        .create_async()
        .await;

    let client = CollectionClient::new(config_for(&server)).unwrap();
    let ids = client
        .search(&query("cats", -5000, 5000), &CancellationHandle::new())
        .await
        .unwrap();

    assert!(ids.is_empty());
    search.assert_async().await;
}

#[tokio::test]
async fn error_status_becomes_remote_error() {
    let mut server = setup_mock_server().await;
    let _search = mock_status(&mut server, SEARCH_PATH, 503).await;

    let client = CollectionClient::new(config_for(&server)).unwrap();
    let err = client
        .search(&query("cats", 0, 10), &CancellationHandle::new())
        .await
        .unwrap_err();

    match err {
        ExplorerError::Remote { status, url } => {
            assert_eq!(status, 503);
            assert!(url.contains("/public/collection/v1/search"));
        }
        other => panic!("expected Remote error, got {other:?}"),
    }
    assert_eq!(client.metrics().failures, 1);
}

#[tokio::test]
async fn missing_object_is_remote_404() {
    let mut server = setup_mock_server().await;
    let _missing = mock_status(&mut server, "/public/collection/v1/objects/999", 404).await;

    let client = CollectionClient::new(config_for(&server)).unwrap();
    let err = client
        .fetch_detail(ObjectId(999), &CancellationHandle::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ExplorerError::Remote { status: 404, .. }));
    assert!(client.cache().is_empty());
}

#[tokio::test]
async fn undecodable_body_is_unknown_error() {
    let mut server = setup_mock_server().await;
    let _search = server
        .mock("GET", SEARCH_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let client = CollectionClient::new(config_for(&server)).unwrap();
    let err = client
        .search(&query("cats", 0, 10), &CancellationHandle::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ExplorerError::Unknown(_)));
}

#[tokio::test]
async fn details_are_cached_after_first_success() {
    let mut server = setup_mock_server().await;
    let detail = server
        .mock("GET", "/public/collection/v1/objects/42")
        .with_status(200)
        .with_body(object_json(42, "The Harvesters", 1565, true).to_string())
        .expect(1)
        .create_async()
        .await;

    let client = CollectionClient::new(config_for(&server)).unwrap();
    let cancel = CancellationHandle::new();
    let first = client.fetch_detail(ObjectId(42), &cancel).await.unwrap();
    let second = client.fetch_detail(ObjectId(42), &cancel).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.title.as_deref(), Some("The Harvesters"));
    detail.assert_async().await;

    let metrics = client.metrics();
    assert_eq!(metrics.detail_requests, 1);
    assert_eq!(metrics.cache_hits, 1);
}

#[tokio::test]
async fn explore_starts_one_fetch_per_id() {
    let mut server = setup_mock_server().await;
    let _search = mock_search(&mut server, "wheat", &[1, 2]).await;
    let _one = mock_object(&mut server, 1, &object_json(1, "One", 1889, true)).await;
    let _two = mock_object(&mut server, 2, &object_json(2, "Two", 1890, true)).await;

    let client = CollectionClient::new(config_for(&server)).unwrap();
    let pending = client
        .explore(&query("wheat", 1800, 1900), &CancellationHandle::new())
        .await
        .unwrap();

    assert_eq!(
        pending.iter().map(|p| p.id()).collect::<Vec<_>>(),
        vec![ObjectId(1), ObjectId(2)]
    );
    for detail in pending {
        let (id, record) = detail.settle().await;
        assert_eq!(record.unwrap().object_id, Some(id));
    }
}

#[tokio::test]
async fn cancelling_stops_pending_detail_fetches() {
    let mut server = setup_mock_server().await;
    let _search = mock_search(&mut server, "wheat", &[1]).await;
    // Spawned fetches are not polled before the test yields, so cancel wins
    let _detail = server
        .mock("GET", "/public/collection/v1/objects/1")
        .with_status(200)
        .with_body(object_json(1, "One", 1889, true).to_string())
        .create_async()
        .await;

    let client = CollectionClient::new(config_for(&server)).unwrap();
    let cancel = CancellationHandle::new();
    let pending = client.explore(&query("wheat", 1800, 1900), &cancel).await.unwrap();
    cancel.cancel();

    for detail in pending {
        let (_, record) = detail.settle().await;
        assert!(record.unwrap_err().is_cancelled());
    }
    assert!(client.cache().is_empty());
    assert_eq!(client.metrics().cancellations, 1);
}

/// Accepts connections and holds them open without ever answering
async fn silent_origin() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{addr}")
}

fn silent_client(origin: String) -> CollectionClient {
    let config = kodegen_tools_artexplorer::ExplorerConfig::builder()
        .origin(origin)
        .build()
        .unwrap();
    CollectionClient::new(config).unwrap()
}

#[tokio::test]
async fn cancel_during_detail_request_aborts_without_caching() {
    let client = silent_client(silent_origin().await);
    let cancel = CancellationHandle::new();

    let canceller = cancel.clone();
    let (result, ()) = tokio::join!(client.fetch_detail(ObjectId(5), &cancel), async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        canceller.cancel();
    });

    assert!(result.unwrap_err().is_cancelled());
    assert!(client.cache().is_empty());
    let metrics = client.metrics();
    assert_eq!(metrics.detail_requests, 1);
    assert_eq!(metrics.cancellations, 1);
}

#[tokio::test]
async fn cancel_during_search_request_aborts() {
    let client = silent_client(silent_origin().await);
    let cancel = CancellationHandle::new();

    let canceller = cancel.clone();
    let search_query = query("cats", 0, 10);
    let (result, ()) = tokio::join!(client.search(&search_query, &cancel), async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        canceller.cancel();
    });

    assert!(result.unwrap_err().is_cancelled());
    assert!(client.cache().is_empty());
    let metrics = client.metrics();
    assert_eq!(metrics.search_requests, 1);
    assert_eq!(metrics.cancellations, 1);
    assert_eq!(metrics.failures, 0);
}
