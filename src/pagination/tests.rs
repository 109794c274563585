//! Tests for pagination module

use super::*;
use crate::config::{ClientOptions, RequestOptions};
use crate::error::Error;
use crate::http::{HttpClient, QueryParams};
use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn page_body(values: &[i32], meta: &Metadata) -> serde_json::Value {
    json!({ "result": values, "meta": meta })
}

/// Three pages of three values (1..9) at `/pager`, plus `/empty`
async fn setup_mock() -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pager"))
        .and(query_param_is_missing(CURSOR))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(&[1, 2, 3], &Metadata::next("cursor1"))),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/pager"))
        .and(query_param(CURSOR, "cursor1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(&[4, 5, 6], &Metadata::next("cursor2"))),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/pager"))
        .and(query_param(CURSOR, "cursor2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_body(&[7, 8, 9], &Metadata::last())),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[], &Metadata::last())))
        .mount(&mock_server)
        .await;

    mock_server
}

fn test_client(server: &MockServer) -> Arc<HttpClient> {
    let options = ClientOptions::builder()
        .api_token("test-token")
        .base_url(Url::parse(&server.uri()).unwrap())
        .retry(0)
        .build();
    Arc::new(HttpClient::new(options).unwrap())
}

fn meta_for_page(page: usize, pages: usize) -> Metadata {
    if page + 1 < pages {
        Metadata::next(format!("cursor{}", page + 1))
    } else {
        Metadata::last()
    }
}

// ============================================================================
// Types
// ============================================================================

#[test]
fn test_metadata_contract() {
    let meta = Metadata::next("abc");
    assert!(meta.has_next_page());
    assert_eq!(meta.next_page_cursor(), Some("abc"));

    let meta = Metadata::last();
    assert!(!meta.has_next_page());
    assert_eq!(meta.next_page_cursor(), None);
}

#[test]
fn test_metadata_deserialize_without_cursor() {
    let meta: Metadata = serde_json::from_value(json!({"has_next": false})).unwrap();
    assert_eq!(meta, Metadata::last());

    let meta: Metadata =
        serde_json::from_value(json!({"has_next": true, "next_cursor": null})).unwrap();
    assert!(meta.has_next);
    assert!(meta.next_cursor.is_none());
}

#[test]
fn test_page_into_items_tags_metadata() {
    let page = Page {
        result: vec!["a", "b"],
        meta: Metadata::next("c1"),
    };

    assert_eq!(
        page.into_items(),
        vec![
            Item {
                value: "a",
                meta: Metadata::next("c1")
            },
            Item {
                value: "b",
                meta: Metadata::next("c1")
            },
        ]
    );
}

#[test]
fn test_page_input_to_query() {
    let query = PageInput::new().limit(20).cursor("abc").to_query();
    assert_eq!(query.get(LIMIT), Some("20"));
    assert_eq!(query.get(CURSOR), Some("abc"));

    assert!(PageInput::default().to_query().is_empty());
}

// ============================================================================
// get_next_page
// ============================================================================

#[tokio::test]
async fn test_get_next_page_walks_all_pages() {
    let mock_server = setup_mock().await;
    let mut pager: Pager<i32, Metadata> =
        Pager::new(test_client(&mock_server), "/pager", QueryParams::new());

    assert!(pager.has_next_page());

    let want = [[1, 2, 3], [4, 5, 6], [7, 8, 9]];
    for (i, values) in want.iter().enumerate() {
        let page = pager.get_next_page().await.unwrap();
        assert_eq!(
            page,
            Page {
                result: values.to_vec(),
                meta: meta_for_page(i, want.len()),
            }
        );
    }

    assert!(!pager.has_next_page());

    // overflow
    let err = pager.get_next_page().await.unwrap_err();
    assert!(matches!(err, Error::EndOfPages));
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_get_next_page_empty() {
    let mock_server = setup_mock().await;
    let mut pager: Pager<i32, Metadata> =
        Pager::new(test_client(&mock_server), "/empty", QueryParams::new());

    let page = pager.get_next_page().await.unwrap();
    assert!(page.result.is_empty());
    assert!(!pager.has_next_page());

    let err = pager.get_next_page().await.unwrap_err();
    assert!(matches!(err, Error::EndOfPages));
}

#[tokio::test]
async fn test_cursor_propagation() {
    let mock_server = setup_mock().await;
    let mut pager: Pager<i32, Metadata> =
        Pager::new(test_client(&mock_server), "/pager", QueryParams::new());

    let mut sent_cursors = Vec::new();
    let mut returned_cursors = Vec::new();
    while pager.has_next_page() {
        let page = pager.get_next_page().await.unwrap();
        returned_cursors.push(page.meta.next_cursor.clone());
    }

    for request in mock_server.received_requests().await.unwrap() {
        let cursor = request
            .url
            .query_pairs()
            .find(|(k, _)| k == CURSOR)
            .map(|(_, v)| v.into_owned());
        sent_cursors.push(cursor);
    }

    // The cursor sent with fetch N+1 is the one returned by fetch N
    assert_eq!(sent_cursors[0], None);
    assert_eq!(sent_cursors[1..], returned_cursors[..returned_cursors.len() - 1]);
}

#[tokio::test]
async fn test_initial_query_is_kept_alongside_cursor() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/filtered"))
        .and(query_param("domain", "example.com"))
        .and(query_param(LIMIT, "2"))
        .and(query_param_is_missing(CURSOR))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[1, 2], &Metadata::next("c1"))))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/filtered"))
        .and(query_param("domain", "example.com"))
        .and(query_param(LIMIT, "2"))
        .and(query_param(CURSOR, "c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[3], &Metadata::last())))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut query = PageInput::new().limit(2).to_query();
    query.set("domain", "example.com");

    let mut pager: Pager<i32, Metadata> = Pager::new(test_client(&mock_server), "/filtered", query);
    let values = pager.collect_all().await.unwrap();

    assert_eq!(values, vec![1, 2, 3]);
    assert_eq!(pager.query().get(CURSOR), Some("c1"));
}

#[tokio::test]
async fn test_has_next_without_cursor_is_exhausted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/odd"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"result": [1], "meta": {"has_next": true, "next_cursor": null}})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut pager: Pager<i32, Metadata> =
        Pager::new(test_client(&mock_server), "/odd", QueryParams::new());

    let page = pager.get_next_page().await.unwrap();
    assert_eq!(page.result, vec![1]);
    assert!(!pager.has_next_page());
}

#[tokio::test]
async fn test_failed_fetch_keeps_pager_active() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "bad"})))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[1], &Metadata::last())))
        .mount(&mock_server)
        .await;

    let mut pager: Pager<i32, Metadata> =
        Pager::new(test_client(&mock_server), "/flaky", QueryParams::new());

    let err = pager.get_next_page().await.unwrap_err();
    assert_eq!(err.status_code(), Some(400));
    assert!(pager.has_next_page());

    let page = pager.get_next_page().await.unwrap();
    assert_eq!(page.result, vec![1]);
}

#[tokio::test]
async fn test_cancelled_fetch_keeps_pager_active() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(&[1], &Metadata::last()))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let mut pager: Pager<i32, Metadata> =
        Pager::new(test_client(&mock_server), "/slow", QueryParams::new());

    let result = tokio::time::timeout(Duration::from_millis(50), pager.get_next_page()).await;
    assert!(result.is_err());
    assert!(pager.has_next_page());
    assert_eq!(pager.query().get(CURSOR), None);
}

#[tokio::test]
async fn test_pager_uses_request_options() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pager"))
        .and(wiremock::matchers::header("Authorization", "Bearer page-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[1], &Metadata::last())))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut pager: Pager<i32, Metadata> =
        Pager::new(test_client(&mock_server), "/pager", QueryParams::new())
            .with_options(RequestOptions::new().api_token("page-token"));

    assert_eq!(pager.collect_all().await.unwrap(), vec![1]);
}

// ============================================================================
// items()
// ============================================================================

#[tokio::test]
async fn test_items_yields_all_values_in_order() {
    let mock_server = setup_mock().await;
    let mut pager: Pager<i32, Metadata> =
        Pager::new(test_client(&mock_server), "/pager", QueryParams::new());

    let items: Vec<Item<i32, Metadata>> = {
        let stream = pager.items();
        stream.map(Result::unwrap).collect().await
    };

    let want: Vec<Item<i32, Metadata>> = (1..=9)
        .map(|value| Item {
            value,
            meta: meta_for_page((value as usize - 1) / 3, 3),
        })
        .collect();
    assert_eq!(items, want);

    assert!(!pager.has_next_page());
    assert!(matches!(
        pager.get_next_page().await.unwrap_err(),
        Error::EndOfPages
    ));
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_items_empty() {
    let mock_server = setup_mock().await;
    let mut pager: Pager<i32, Metadata> =
        Pager::new(test_client(&mock_server), "/empty", QueryParams::new());

    let items: Vec<_> = pager.items().collect().await;

    assert!(items.is_empty());
    assert!(!pager.has_next_page());
}

#[tokio::test]
async fn test_items_fetches_lazily() {
    let mock_server = setup_mock().await;
    let mut pager: Pager<i32, Metadata> =
        Pager::new(test_client(&mock_server), "/pager", QueryParams::new());

    {
        let mut items = pin!(pager.items());
        let first = items.next().await.unwrap().unwrap();
        let second = items.next().await.unwrap().unwrap();
        assert_eq!((first.value, second.value), (1, 2));
    }

    // Only the first page was requested; the consumer stopped early
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
    assert!(pager.has_next_page());
    assert_eq!(pager.query().get(CURSOR), Some("cursor1"));
}

#[tokio::test]
async fn test_items_stops_after_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .and(query_param_is_missing(CURSOR))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[1, 2], &Metadata::next("c1"))))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .and(query_param(CURSOR, "c1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut pager: Pager<i32, Metadata> =
        Pager::new(test_client(&mock_server), "/broken", QueryParams::new());

    let results: Vec<crate::Result<Item<i32, Metadata>>> = pager.items().collect().await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().value, 1);
    assert_eq!(results[1].as_ref().unwrap().value, 2);
    let err = results[2].as_ref().unwrap_err();
    assert_eq!(err.status_code(), Some(500));
}

#[tokio::test]
async fn test_into_items_owns_pager() {
    let mock_server = setup_mock().await;
    let pager: Pager<i32, Metadata> =
        Pager::new(test_client(&mock_server), "/pager", QueryParams::new());

    let values: Vec<i32> = pager
        .into_items()
        .map(|item| item.unwrap().value)
        .collect()
        .await;

    assert_eq!(values, (1..=9).collect::<Vec<_>>());
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
struct ProjectMetadata {
    #[serde(flatten)]
    pagination: Metadata,
    project_id: String,
}

impl PageMetadata for ProjectMetadata {
    fn has_next_page(&self) -> bool {
        self.pagination.has_next_page()
    }

    fn next_page_cursor(&self) -> Option<&str> {
        self.pagination.next_page_cursor()
    }
}

#[tokio::test]
async fn test_custom_metadata_drives_same_pager() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param_is_missing(CURSOR))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": ["a"],
            "meta": {"has_next": true, "next_cursor": "n1", "project_id": "p"}
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param(CURSOR, "n1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": ["b"],
            "meta": {"has_next": false, "project_id": "p"}
        })))
        .mount(&mock_server)
        .await;

    let mut pager: Pager<String, ProjectMetadata> =
        Pager::new(test_client(&mock_server), "/projects", QueryParams::new());

    let items: Vec<_> = pager.items().map(Result::unwrap).collect().await;

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].value, "a");
    assert_eq!(items[0].meta.project_id, "p");
    assert_eq!(items[0].meta.pagination, Metadata::next("n1"));
    assert_eq!(items[1].meta.pagination, Metadata::last());
}

#[test]
fn test_page_null_or_missing_result_is_empty() {
    let page: Page<i32, Metadata> =
        serde_json::from_value(json!({"result": null, "meta": {"has_next": false}})).unwrap();
    assert!(page.result.is_empty());

    let page: Page<i32, Metadata> =
        serde_json::from_value(json!({"meta": {"has_next": false}})).unwrap();
    assert!(page.result.is_empty());
    assert_eq!(page.meta, Metadata::last());
}

#[tokio::test]
async fn test_null_result_page_is_walked_as_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/null"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": null,
            "meta": {"has_next": false, "next_cursor": null}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut pager: Pager<i32, Metadata> =
        Pager::new(test_client(&mock_server), "/null", QueryParams::new());

    let page = pager.get_next_page().await.unwrap();
    assert!(page.result.is_empty());
    assert!(!pager.has_next_page());
}

#[tokio::test]
async fn test_empty_body_page_ends_pagination() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/no-content"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut pager: Pager<i32, Metadata> =
        Pager::new(test_client(&mock_server), "/no-content", QueryParams::new());

    let values = pager.collect_all().await.unwrap();
    assert!(values.is_empty());
    assert!(!pager.has_next_page());
}
