//! link-checker server binary
//!
//! Reads configuration from the environment (and a `.env` file if present),
//! opens the database and serves the REST API until SIGINT/SIGTERM.

use link_checker::{Config, Database, LinkChecker, run_with_shutdown};
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_LOG_FILTER: &str = "link_checker=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    setup_tracing(&log_format);

    let config = Config::from_env()?;
    tracing::info!(
        database = %config.persistence.database_path.display(),
        address = %config.server.api.bind_address,
        "Starting link-checker"
    );

    let db = Arc::new(Database::new(&config.persistence.database_path).await?);
    let checker = Arc::new(LinkChecker::new(config.clone(), db)?);

    run_with_shutdown(checker, Arc::new(config)).await?;
    Ok(())
}

/// Install the global subscriber: `RUST_LOG` filter, pretty or JSON output
fn setup_tracing(format: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
