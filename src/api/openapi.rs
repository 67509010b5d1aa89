//! OpenAPI documentation and schema generation
//!
//! Describes the link-checker REST API using utoipa for compile-time document
//! generation.

use utoipa::OpenApi;

/// OpenAPI documentation for the link-checker REST API
///
/// The document can be accessed via:
/// - `/api/openapi.json` - JSON format OpenAPI specification
/// - `/swagger-ui` - Interactive Swagger UI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "link-checker REST API",
        version = "0.1.0",
        description = "Check URL reachability in batches and render reports over stored results",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        // Checks
        crate::api::routes::check_links,
        crate::api::routes::get_task,

        // Reports
        crate::api::routes::generate_report,

        // System
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
    ),
    components(schemas(
        // Core types from types.rs
        crate::types::TaskId,
        crate::types::LinkStatus,
        crate::types::Link,
        crate::types::LinkCheckTask,

        // Config types from config.rs
        crate::config::Config,
        crate::config::CheckerConfig,
        crate::config::PersistenceConfig,
        crate::config::ServerIntegrationConfig,
        crate::config::ApiConfig,

        // API request/response types
        crate::api::routes::CheckLinksRequest,
        crate::api::routes::CheckLinksResponse,
        crate::api::routes::GenerateReportRequest,

        // Error types from error.rs
        crate::error::ApiError,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "checks", description = "Link checks - Submit URL lists and read back their statuses"),
        (name = "reports", description = "Reports - Render stored tasks as a document"),
        (name = "system", description = "System endpoints - Health checks, OpenAPI spec"),
    )
)]
pub struct ApiDoc;
