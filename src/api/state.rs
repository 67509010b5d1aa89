//! Application state for the API server

use crate::report::{PlainTextReport, ReportRenderer};
use crate::{Config, LinkChecker};
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// Cloned for each request (cheap Arc clone).
#[derive(Clone)]
pub struct AppState {
    /// The link checker handling check and report requests
    pub checker: Arc<LinkChecker>,

    /// Configuration (request limits)
    pub config: Arc<Config>,

    /// Renderer used by the report endpoint
    pub renderer: Arc<dyn ReportRenderer>,
}

impl AppState {
    /// Create a new AppState with the plain-text report renderer
    pub fn new(checker: Arc<LinkChecker>, config: Arc<Config>) -> Self {
        Self {
            checker,
            config,
            renderer: Arc::new(PlainTextReport),
        }
    }
}
