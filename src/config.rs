//! Configuration types for link-checker

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::PathBuf, time::Duration};
use utoipa::ToSchema;

/// Probe behavior configuration (timeouts, concurrency)
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckerConfig {
    /// Per-probe timeout in seconds (default: 10)
    #[serde(default = "default_probe_timeout", with = "duration_serde")]
    #[schema(value_type = u64)]
    pub probe_timeout: Duration,

    /// Maximum probes in flight at once across all batches (default: 10)
    #[serde(default = "default_max_concurrent_probes")]
    pub max_concurrent_probes: usize,

    /// User-Agent header sent with every probe
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            probe_timeout: default_probe_timeout(),
            max_concurrent_probes: default_max_concurrent_probes(),
            user_agent: default_user_agent(),
        }
    }
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PersistenceConfig {
    /// Database path (default: "links.db")
    #[serde(default = "default_database_path")]
    #[schema(value_type = String)]
    pub database_path: PathBuf,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

/// API and external server integration configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ServerIntegrationConfig {
    /// REST API configuration
    #[serde(default)]
    pub api: ApiConfig,
}

/// REST API configuration
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiConfig {
    /// Address to bind to (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_address")]
    #[schema(value_type = String)]
    pub bind_address: SocketAddr,

    /// Maximum number of links accepted by one check request (default: 100)
    #[serde(default = "default_max_links_per_request")]
    pub max_links_per_request: usize,

    /// Maximum number of task ids accepted by one report request (default: 100)
    #[serde(default = "default_max_report_tasks")]
    pub max_report_tasks: usize,

    /// Time allowed for in-flight requests to finish on shutdown, in seconds (default: 10)
    #[serde(default = "default_shutdown_timeout", with = "duration_serde")]
    #[schema(value_type = u64)]
    pub shutdown_timeout: Duration,

    /// Enable Swagger UI at /swagger-ui (default: true)
    #[serde(default = "default_true")]
    pub swagger_ui: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            max_links_per_request: default_max_links_per_request(),
            max_report_tasks: default_max_report_tasks(),
            shutdown_timeout: default_shutdown_timeout(),
            swagger_ui: true,
        }
    }
}

/// Main configuration for link-checker
///
/// - [`checker`](CheckerConfig) - probe timeout and concurrency gate width
/// - [`persistence`](PersistenceConfig) - database location
/// - [`server`](ServerIntegrationConfig) - REST API settings
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct Config {
    /// Probe behavior settings
    #[serde(default)]
    pub checker: CheckerConfig,

    /// Data storage
    #[serde(default)]
    pub persistence: PersistenceConfig,

    /// API and external server integration
    #[serde(default)]
    pub server: ServerIntegrationConfig,
}

impl Config {
    /// Build a configuration from defaults overridden by environment variables
    ///
    /// Recognized keys: `SERVER_PORT`, `DB_PATH`, `PROBE_TIMEOUT_SECS`,
    /// `MAX_CONCURRENT_PROBES`. Unset or empty variables keep the default.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading from an arbitrary source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Config::default();

        if let Some(port) = get("SERVER_PORT") {
            let port: u16 = parse_value("SERVER_PORT", &port)?;
            config.server.api.bind_address.set_port(port);
        }
        if let Some(path) = get("DB_PATH") {
            config.persistence.database_path = PathBuf::from(path);
        }
        if let Some(secs) = get("PROBE_TIMEOUT_SECS") {
            config.checker.probe_timeout =
                Duration::from_secs(parse_value("PROBE_TIMEOUT_SECS", &secs)?);
        }
        if let Some(limit) = get("MAX_CONCURRENT_PROBES") {
            config.checker.max_concurrent_probes = parse_value("MAX_CONCURRENT_PROBES", &limit)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the checker cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.checker.max_concurrent_probes == 0 {
            return Err(Error::Config {
                message: "max_concurrent_probes must be at least 1".to_string(),
                key: Some("max_concurrent_probes".to_string()),
            });
        }
        if self.checker.probe_timeout.is_zero() {
            return Err(Error::Config {
                message: "probe_timeout must be greater than zero".to_string(),
                key: Some("probe_timeout".to_string()),
            });
        }
        if self.server.api.max_links_per_request == 0 {
            return Err(Error::Config {
                message: "max_links_per_request must be at least 1".to_string(),
                key: Some("max_links_per_request".to_string()),
            });
        }
        if self.server.api.max_report_tasks == 0 {
            return Err(Error::Config {
                message: "max_report_tasks must be at least 1".to_string(),
                key: Some("max_report_tasks".to_string()),
            });
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| Error::Config {
        message: format!("invalid value '{}' for {}: {}", raw, key, e),
        key: Some(key.to_string()),
    })
}

fn default_true() -> bool {
    true
}

fn default_probe_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_max_concurrent_probes() -> usize {
    10
}

fn default_user_agent() -> String {
    format!("link-checker/{}", env!("CARGO_PKG_VERSION"))
}

fn default_database_path() -> PathBuf {
    PathBuf::from("links.db")
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_max_links_per_request() -> usize {
    100
}

fn default_max_report_tasks() -> usize {
    100
}

fn default_shutdown_timeout() -> Duration {
    Duration::from_secs(10)
}

// Duration serialization helper (whole seconds)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
