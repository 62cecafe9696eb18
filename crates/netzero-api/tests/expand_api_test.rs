//! Router tests for the expander service

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::routing::get;
use axum::Router;
use netzero_api::{create_router, AppState};
use netzero_geo::UpstreamExpander;
use serde_json::Value;
use tower::ServiceExt;

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn shortener() -> SocketAddr {
    serve(
        Router::new()
            .route(
                "/abc123",
                get(|| async {
                    (
                        StatusCode::FOUND,
                        [(
                            header::LOCATION,
                            "https://www.google.com/maps/place/Jharia/@23.7500,86.4200,14z",
                        )],
                    )
                }),
            )
            .route("/landing", get(|| async { "a landing page" })),
    )
    .await
}

fn app() -> Router {
    let expander = UpstreamExpander::new(Duration::from_secs(2)).unwrap();
    create_router(Arc::new(AppState::new(expander)))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

fn encode(url: &str) -> String {
    url.replace(':', "%3A").replace('/', "%2F")
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get_json(app(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "netzero-expander");
}

#[tokio::test]
async fn test_expands_one_redirect() {
    let upstream = shortener().await;
    let uri = format!("/expand?url={}", encode(&format!("http://{}/abc123", upstream)));

    let (status, body) = get_json(app(), &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["expanded"],
        "https://www.google.com/maps/place/Jharia/@23.7500,86.4200,14z"
    );
}

#[tokio::test]
async fn test_no_redirect_found() {
    let upstream = shortener().await;
    let uri = format!("/expand?url={}", encode(&format!("http://{}/landing", upstream)));

    let (status, body) = get_json(app(), &uri).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No redirect found");
}

#[tokio::test]
async fn test_missing_or_empty_url() {
    for uri in ["/expand", "/expand?url=", "/expand?url=%20%20"] {
        let (status, body) = get_json(app(), uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"], "No URL provided");
    }
}

#[tokio::test]
async fn test_unreachable_upstream() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let uri = format!("/expand?url={}", encode(&format!("http://{}/abc123", addr)));
    let (status, body) = get_json(app(), &uri).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to expand URL");
    // Upstream error text stays in the logs
    assert_eq!(body, serde_json::json!({ "error": "Failed to expand URL" }));
}

#[tokio::test]
async fn test_invalid_url_is_a_failed_expansion() {
    let (status, body) = get_json(app(), "/expand?url=not-a-url").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to expand URL");
}
