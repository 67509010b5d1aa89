//! Common test utilities for link-checker integration tests

use link_checker::{Config, Database, LinkChecker};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock site with a fixed set of pages:
/// - `/ok` 200
/// - `/moved` 301 to `/missing`
/// - `/missing` 404
/// - `/error` 500
/// - `/slow` 200 after 3 seconds
pub async fn start_mock_site() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200).set_body_string("fine"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/moved"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/missing"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/error"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    server
}

/// Config with a short probe timeout and a database inside `dir`
pub fn test_config(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.checker.probe_timeout = Duration::from_millis(500);
    config.persistence.database_path = dir.path().join("data").join("links.db");
    config
}

/// HTTP-probing checker over a fresh database
pub async fn create_checker(config: &Config) -> Arc<LinkChecker> {
    let db = Database::new(&config.persistence.database_path)
        .await
        .expect("database should open");
    Arc::new(LinkChecker::new(config.clone(), Arc::new(db)).expect("checker should build"))
}
