//! Report rendering for finished link check tasks.
//!
//! Rendering is pluggable through [`ReportRenderer`]; [`PlainTextReport`]
//! is the built-in default used by the HTTP API.

use crate::error::{Error, Result};
use crate::types::LinkCheckTask;
use std::fmt::Write;

/// Turns a set of tasks into a downloadable document
pub trait ReportRenderer: Send + Sync {
    /// Render `tasks` in the order given
    fn render(&self, tasks: &[LinkCheckTask]) -> Result<Vec<u8>>;

    /// MIME type of the rendered output
    fn content_type(&self) -> &'static str;
}

/// One block per task: a `Task <id>` header followed by `<url> - <status>` lines
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainTextReport;

impl ReportRenderer for PlainTextReport {
    fn render(&self, tasks: &[LinkCheckTask]) -> Result<Vec<u8>> {
        let mut out = String::new();

        for (i, task) in tasks.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            writeln!(out, "Task {}", task.id)
                .map_err(|e| Error::Report(format!("Failed to write task header: {}", e)))?;
            for link in &task.links {
                writeln!(out, "{} - {}", link.url, link.status)
                    .map_err(|e| Error::Report(format!("Failed to write link line: {}", e)))?;
            }
        }

        Ok(out.into_bytes())
    }

    fn content_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }
}
