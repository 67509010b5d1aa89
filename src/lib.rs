//! # link-checker
//!
//! Batch URL reachability checking with persisted, idempotent tasks.
//!
//! A list of URLs becomes a task. Every distinct URL is probed once with a
//! bounded-time GET (redirects are not followed), at most
//! `max_concurrent_probes` at a time, and each result is stored as soon as
//! it arrives. Submitting the same set of URLs again returns the same task.
//!
//! ## Quick Start
//!
//! ```no_run
//! use link_checker::{Config, Database, LinkChecker};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let db = Arc::new(Database::new(&config.persistence.database_path).await?);
//!     let checker = LinkChecker::new(config, db)?;
//!
//!     let id = checker
//!         .check_links(&["example.com".to_string(), "https://rust-lang.org".to_string()])
//!         .await?;
//!
//!     for link in checker.get_task_results(id).await?.links {
//!         println!("{} - {}", link.url, link.status);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// REST API module
pub mod api;
/// Link check executor (task creation, bounded probe fan-out, reports)
pub mod checker;
/// Configuration types
pub mod config;
/// Database persistence layer
pub mod db;
/// Error types
pub mod error;
/// URL reachability probing
pub mod probe;
/// Report rendering
pub mod report;
/// Core types
pub mod types;

// Re-export commonly used types
pub use checker::LinkChecker;
pub use config::Config;
pub use db::Database;
pub use error::{ApiError, DatabaseError, Error, ErrorDetail, Result, TaskError, ToHttpStatus};
pub use probe::{HttpProber, Prober};
pub use report::{PlainTextReport, ReportRenderer};
pub use types::{Link, LinkCheckTask, LinkStatus, TaskId};

use std::sync::Arc;

/// Serve the REST API until a termination signal arrives.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
///
/// The database pool is closed once the server has drained.
///
/// # Example
///
/// ```no_run
/// use link_checker::{Config, Database, LinkChecker, run_with_shutdown};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Arc::new(Config::from_env()?);
///     let db = Arc::new(Database::new(&config.persistence.database_path).await?);
///     let checker = Arc::new(LinkChecker::new((*config).clone(), db)?);
///
///     run_with_shutdown(checker, config).await?;
///
///     Ok(())
/// }
/// ```
pub async fn run_with_shutdown(checker: Arc<LinkChecker>, config: Arc<Config>) -> Result<()> {
    let db = checker.db.clone();
    api::start_api_server(checker, config, wait_for_signal()).await?;

    db.pool().close().await;
    tracing::info!("Database closed");
    Ok(())
}

/// Resolve once the process is asked to terminate
#[cfg(unix)]
pub async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Set up signal handlers - these may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Err(e), _) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            if let Ok(mut sigint) = signal(SignalKind::interrupt()) {
                sigint.recv().await;
                tracing::info!("Received SIGINT signal (Ctrl+C)");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
        (_, Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
                sigterm.recv().await;
                tracing::info!("Received SIGTERM signal");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
    }
}

/// Resolve once the process is asked to terminate
#[cfg(not(unix))]
pub async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}
