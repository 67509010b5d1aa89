use super::*;
use crate::Database;
use crate::probe::Prober;
use crate::types::LinkStatus;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use std::time::Duration;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

mod system;

/// Prober that answers without touching the network: URLs containing
/// "down" are unreachable, everything else is reachable
struct StaticProber;

#[async_trait]
impl Prober for StaticProber {
    async fn probe(&self, url: &str, _cancel: &CancellationToken) -> LinkStatus {
        if url.contains("down") {
            LinkStatus::NotAvailable
        } else {
            LinkStatus::Available
        }
    }
}

/// Helper to create a test LinkChecker instance wrapped in Arc
async fn create_test_checker(config: Config) -> (Arc<LinkChecker>, TempDir) {
    let temp_dir = tempfile::tempdir().unwrap();
    let db = Database::new(&temp_dir.path().join("links.db"))
        .await
        .unwrap();
    let checker =
        LinkChecker::with_prober(config, Arc::new(db), Arc::new(StaticProber)).unwrap();
    (Arc::new(checker), temp_dir)
}

/// Router over a fresh checker with default configuration
async fn create_test_app() -> (Router, Arc<LinkChecker>, TempDir) {
    let (checker, temp_dir) = create_test_checker(Config::default()).await;
    let app = create_router(checker.clone(), checker.config().clone());
    (app, checker, temp_dir)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn body_text(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

#[tokio::test]
async fn test_api_server_serves_until_shutdown() {
    let mut config = Config::default();
    config.server.api.bind_address = "127.0.0.1:0".parse().unwrap();
    let (checker, _temp_dir) = create_test_checker(config.clone()).await;

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let api_handle = tokio::spawn(start_api_server(checker, Arc::new(config), async move {
        let _ = stop_rx.await;
    }));

    tokio::time::sleep(Duration::from_millis(100)).await;
    stop_tx.send(()).unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), api_handle)
        .await
        .expect("server should stop after shutdown signal")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_api_server_reports_bind_failure() {
    let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let mut config = Config::default();
    config.server.api.bind_address = occupied.local_addr().unwrap();
    let (checker, _temp_dir) = create_test_checker(config.clone()).await;

    let result = start_api_server(checker, Arc::new(config), std::future::pending()).await;
    assert!(matches!(result, Err(crate::Error::Io(_))));
}

#[tokio::test]
async fn test_api_server_over_tcp() {
    let probe = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = probe.local_addr().unwrap();
    drop(probe);

    let mut config = Config::default();
    config.server.api.bind_address = addr;
    let (checker, _temp_dir) = create_test_checker(config.clone()).await;

    let stop = CancellationToken::new();
    let api_handle = tokio::spawn({
        let stop = stop.clone();
        start_api_server(checker, Arc::new(config), async move {
            stop.cancelled().await
        })
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{}/api/check", addr))
        .json(&serde_json::json!({"links": ["up.example", "down.example"]}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(body["links"]["up.example"], "available");
    assert_eq!(body["links"]["down.example"], "not available");

    stop.cancel();
    api_handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_swagger_ui_toggle() {
    let (checker, _temp_dir) = create_test_checker(Config::default()).await;

    let mut disabled = Config::default();
    disabled.server.api.swagger_ui = false;
    let app = create_router(checker.clone(), Arc::new(disabled));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/swagger-ui/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = create_router(checker.clone(), Arc::new(Config::default()));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/swagger-ui/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
