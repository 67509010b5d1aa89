//! REST API server module
//!
//! Exposes link checking, task lookup and report generation over HTTP.

use crate::{Config, LinkChecker, Result};
use axum::{
    Router,
    routing::{get, post},
};
use std::future::{Future, IntoFuture};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod error_response;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use state::AppState;

/// Create the API router with all route definitions
///
/// # Routes
///
/// ## Checks
/// - `POST /api/check` - Check a list of links, returns statuses and task id
/// - `GET /api/tasks/:id` - Get a stored task
///
/// ## Reports
/// - `POST /api/report` - Render a report over stored tasks
///
/// ## System
/// - `GET /health` - Health check
/// - `GET /api/openapi.json` - OpenAPI specification
/// - `GET /swagger-ui` - Interactive Swagger UI documentation (if enabled,
///   backed by its own copy of the document at `/api-docs/openapi.json`)
pub fn create_router(checker: Arc<LinkChecker>, config: Arc<Config>) -> Router {
    let state = AppState::new(checker, config.clone());

    let router = Router::new()
        // Checks
        .route("/api/check", post(routes::check_links))
        .route("/api/tasks/:id", get(routes::get_task))
        // Reports
        .route("/api/report", post(routes::generate_report))
        // System
        .route("/health", get(routes::health_check))
        .route("/api/openapi.json", get(routes::openapi_spec));

    // Merge Swagger UI routes if enabled in config (before applying state)
    let router = if config.server.api.swagger_ui {
        router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
    } else {
        router
    };

    router.with_state(state).layer(TraceLayer::new_for_http())
}

/// Start the API server on the configured bind address.
///
/// Serves until `shutdown` resolves, then stops accepting connections and
/// lets in-flight requests finish for up to `server.api.shutdown_timeout`.
///
/// # Example
///
/// ```no_run
/// use link_checker::{Config, Database, LinkChecker};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let db = Arc::new(Database::new(&config.persistence.database_path).await?);
/// let checker = Arc::new(LinkChecker::new(config.clone(), db)?);
///
/// link_checker::api::start_api_server(checker, Arc::new(config), link_checker::wait_for_signal())
///     .await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_api_server<F>(
    checker: Arc<LinkChecker>,
    config: Arc<Config>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let bind_address = config.server.api.bind_address;
    let grace = config.server.api.shutdown_timeout;

    tracing::info!(address = %bind_address, "Starting API server");

    let app = create_router(checker, config);

    let listener = TcpListener::bind(bind_address)
        .await
        .map_err(crate::error::Error::Io)?;

    tracing::info!(
        address = %listener.local_addr().unwrap_or(bind_address),
        "API server listening"
    );

    // Fires once the shutdown future resolves; bounds how long draining may take
    let stopping = tokio_util::sync::CancellationToken::new();
    let serve = axum::serve(listener, app).with_graceful_shutdown({
        let stopping = stopping.clone();
        async move {
            shutdown.await;
            tracing::info!("Shutdown requested, draining connections");
            stopping.cancel();
        }
    })
    .into_future();

    tokio::select! {
        result = serve => {
            result.map_err(|e| crate::error::Error::ApiServerError(e.to_string()))?;
        }
        _ = async {
            stopping.cancelled().await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!(
                timeout_secs = grace.as_secs(),
                "In-flight requests did not finish before the shutdown timeout"
            );
        }
    }

    tracing::info!("API server stopped");
    Ok(())
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
