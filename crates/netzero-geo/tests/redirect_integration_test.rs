//! Integration tests for the HTTP redirect adapters against local servers

use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use netzero_core::NetZeroError;
use netzero_geo::{CoordinateResolver, ExpanderClient, RedirectResolver, UpstreamExpander};
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// A stand-in for a link shortener
fn shortener() -> Router {
    Router::new()
        .route(
            "/abc123",
            get(|| async {
                (
                    StatusCode::FOUND,
                    [(header::LOCATION, "/maps/place/Mine/@23.5937,78.9629,15z")],
                )
            }),
        )
        .route(
            "/absolute",
            get(|| async {
                (
                    StatusCode::MOVED_PERMANENTLY,
                    [(header::LOCATION, "https://maps.google.com/?q=23.7957,86.4304")],
                )
            }),
        )
        .route("/plain", get(|| async { "no redirect here" }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "too late"
            }),
        )
}

/// A stand-in for the expander service
fn expander_service() -> Router {
    Router::new().route(
        "/expand",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            match params.get("url").map(String::as_str) {
                Some("https://maps.app.goo.gl/abc123") => (
                    StatusCode::OK,
                    Json(json!({ "expanded": "https://www.google.com/maps/place/Mine/@23.5937,78.9629,15z" })),
                )
                    .into_response(),
                Some(_) => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "No redirect found" })),
                )
                    .into_response(),
                None => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "No URL provided" })),
                )
                    .into_response(),
            }
        }),
    )
}

#[tokio::test]
async fn test_upstream_resolves_relative_location() {
    let addr = serve(shortener()).await;
    let expander = UpstreamExpander::new(Duration::from_secs(2)).unwrap();

    let expanded = expander
        .follow_once(&format!("http://{}/abc123", addr))
        .await
        .unwrap();

    assert_eq!(
        expanded.as_deref(),
        Some(format!("http://{}/maps/place/Mine/@23.5937,78.9629,15z", addr).as_str())
    );
}

#[tokio::test]
async fn test_upstream_follows_only_one_hop() {
    let addr = serve(shortener()).await;
    let expander = UpstreamExpander::new(Duration::from_secs(2)).unwrap();

    let expanded = expander
        .expand(&format!("http://{}/absolute", addr))
        .await
        .unwrap();

    assert_eq!(expanded, "https://maps.google.com/?q=23.7957,86.4304");
}

#[tokio::test]
async fn test_upstream_without_location() {
    let addr = serve(shortener()).await;
    let expander = UpstreamExpander::new(Duration::from_secs(2)).unwrap();
    let link = format!("http://{}/plain", addr);

    assert_eq!(expander.follow_once(&link).await.unwrap(), None);

    let err = expander.expand(&link).await.unwrap_err();
    assert!(matches!(err, NetZeroError::ResolverBadResponse { ref reason } if reason == "No redirect found"));
}

#[tokio::test]
async fn test_upstream_timeout() {
    let addr = serve(shortener()).await;
    let expander = UpstreamExpander::new(Duration::from_millis(100)).unwrap();

    let err = expander
        .follow_once(&format!("http://{}/slow", addr))
        .await
        .unwrap_err();

    assert!(matches!(err, NetZeroError::ResolverTimeout { .. }));
}

#[tokio::test]
async fn test_unreachable_expander() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ExpanderClient::new(&format!("http://{}", addr), Duration::from_secs(2)).unwrap();
    let err = client.expand("https://maps.app.goo.gl/abc123").await.unwrap_err();

    assert!(matches!(err, NetZeroError::ResolverUnreachable { .. }));
}

#[tokio::test]
async fn test_client_reports_service_error_message() {
    let addr = serve(expander_service()).await;
    let client = ExpanderClient::new(&format!("http://{}", addr), Duration::from_secs(2)).unwrap();

    let err = client.expand("https://goo.gl/maps/unknown").await.unwrap_err();

    assert!(matches!(err, NetZeroError::ResolverBadResponse { ref reason } if reason == "No redirect found"));
}

#[tokio::test]
async fn test_resolver_through_expander_service() {
    let addr = serve(expander_service()).await;
    let client = ExpanderClient::new(&format!("http://{}", addr), Duration::from_secs(2)).unwrap();
    let resolver = CoordinateResolver::new(Arc::new(client), Duration::from_secs(2));

    let found = resolver.resolve("https://maps.app.goo.gl/abc123").await.unwrap();

    assert_eq!(found.coordinates.lat, 23.5937);
    assert_eq!(found.coordinates.lng, 78.9629);
    assert_eq!(found.rule, "at-view");
}
