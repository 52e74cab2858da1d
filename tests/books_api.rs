//! End-to-end tests for the HTTP surface, driven through the router with a
//! stub upstream.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use books_service::models::book::{BookInformation, ImageLinks};
use books_service::services::aggregator::{FetchPolicy, MAX_LIMIT};
use books_service::services::upstream::{BookSource, UpstreamError};
use books_service::{app, AppState};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

struct StubSource {
    pages: Vec<Vec<BookInformation>>,
    calls: AtomicUsize,
    fail: bool,
}

impl StubSource {
    fn with_pages(pages: Vec<Vec<BookInformation>>) -> Arc<Self> {
        Arc::new(Self {
            pages,
            calls: AtomicUsize::new(0),
            fail: false,
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            pages: Vec::new(),
            calls: AtomicUsize::new(0),
            fail: true,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BookSource for StubSource {
    async fn search(
        &self,
        _query: &str,
        _start_index: usize,
    ) -> Result<Vec<BookInformation>, UpstreamError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(UpstreamError::Status(502));
        }
        Ok(self.pages.get(call).cloned().unwrap_or_default())
    }
}

fn complete(title: &str) -> BookInformation {
    BookInformation {
        title: title.to_string(),
        description: "A book".to_string(),
        authors: vec!["Author".to_string()],
        categories: Vec::new(),
        page_count: 250,
        image_links: ImageLinks {
            small_thumbnail: "http://img/small".to_string(),
            thumbnail: "http://img/normal".to_string(),
        },
    }
}

fn incomplete(title: &str) -> BookInformation {
    BookInformation {
        authors: Vec::new(),
        ..complete(title)
    }
}

fn router(source: Arc<StubSource>) -> Router {
    app(AppState::new(source, FetchPolicy::default()))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

fn titles(body: &Value) -> Vec<String> {
    body["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["book_information"]["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn ping_answers_pong() {
    let (status, body) = get(router(StubSource::with_pages(Vec::new())), "/ping").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"pong");
}

#[tokio::test]
async fn status_reports_running() {
    let (status, body) = get_json(router(StubSource::with_pages(Vec::new())), "/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "books-service");
    assert_eq!(body["status"], "running");
}

#[tokio::test]
async fn returns_first_books_in_arrival_order() {
    let page = (1..=5).map(|i| complete(&format!("dune {i}"))).collect();
    let source = StubSource::with_pages(vec![page]);

    let (status, body) = get_json(router(source.clone()), "/books?query=dune&limit=3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "dune");
    assert_eq!(body["total"], 3);
    assert_eq!(titles(&body), vec!["dune 1", "dune 2", "dune 3"]);
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn response_uses_upstream_field_names() {
    let source = StubSource::with_pages(vec![vec![complete("dune")]]);

    let (_, body) = get_json(router(source), "/books?query=dune&limit=1").await;
    let info = &body["books"][0]["book_information"];

    assert_eq!(info["description"], "A book");
    assert_eq!(info["authors"][0], "Author");
    assert_eq!(info["pageCount"], 250);
    assert_eq!(info["imageLinks"]["smallThumbnail"], "http://img/small");
    assert_eq!(info["imageLinks"]["thumbnail"], "http://img/normal");
}

#[tokio::test]
async fn skips_incomplete_records() {
    let page = vec![
        incomplete("x1"),
        complete("a"),
        incomplete("x2"),
        complete("b"),
        incomplete("x3"),
    ];
    let source = StubSource::with_pages(vec![page]);

    let (status, body) = get_json(router(source), "/books?query=dune&limit=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(titles(&body), vec!["a", "b"]);
}

#[tokio::test]
async fn zero_limit_skips_upstream() {
    let source = StubSource::with_pages(vec![vec![complete("a")]]);

    let (status, body) = get_json(router(source.clone()), "/books?query=dune&limit=0").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert_eq!(body["books"], Value::Array(Vec::new()));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn no_match_is_an_empty_success() {
    let source = StubSource::with_pages(Vec::new());

    let (status, body) = get_json(router(source), "/books?query=zzzz&limit=5").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "zzzz");
    assert_eq!(body["total"], 0);
    assert_eq!(body["books"], Value::Array(Vec::new()));
}

#[tokio::test]
async fn exhausted_upstream_returns_partial_result() {
    let source = StubSource::with_pages(vec![
        vec![complete("a"), incomplete("x")],
        vec![incomplete("y"), complete("b")],
    ]);

    let (status, body) = get_json(router(source.clone()), "/books?query=dune&limit=10").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(titles(&body), vec!["a", "b"]);
    assert_eq!(source.calls(), 3);
}

#[tokio::test]
async fn limit_above_ceiling_is_capped() {
    let page: Vec<_> = (0..MAX_LIMIT + 10)
        .map(|i| complete(&format!("b{i}")))
        .collect();
    let source = StubSource::with_pages(vec![page]);

    let (status, body) = get_json(router(source), "/books?query=dune&limit=1000").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], MAX_LIMIT);
    assert_eq!(body["books"].as_array().unwrap().len(), MAX_LIMIT);
}

#[tokio::test]
async fn query_is_echoed_decoded() {
    let source = StubSource::with_pages(vec![vec![complete("a")]]);

    let (_, body) = get_json(router(source), "/books?query=dune%20messiah&limit=1").await;

    assert_eq!(body["query"], "dune messiah");
}

#[tokio::test]
async fn invalid_params_are_bad_requests() {
    let cases = [
        ("/books?limit=3", "query is required"),
        ("/books?query=&limit=3", "query is required"),
        ("/books?query=dune", "limit is required"),
        ("/books?query=dune&limit=-1", "limit cant be a negative number"),
        ("/books?query=dune&limit=abc", "processing limit:"),
    ];

    for (uri, message) in cases {
        let source = StubSource::with_pages(vec![vec![complete("a")]]);
        let (status, body) = get(router(source.clone()), uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(
            String::from_utf8_lossy(&body).starts_with(message),
            "{uri}"
        );
        assert_eq!(source.calls(), 0, "{uri}");
    }
}

#[tokio::test]
async fn upstream_failure_is_internal_error() {
    let source = StubSource::failing();

    let (status, body) = get(router(source.clone()), "/books?query=dune&limit=3").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(String::from_utf8_lossy(&body).starts_with("getting books:"));
    assert_eq!(source.calls(), 1);
}
