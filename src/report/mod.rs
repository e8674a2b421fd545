//! Read-only views of a [RouteSession](crate::routing::RouteSession).
//!
//! - `text.rs`: indented outline for terminals
//! - `json.rs`: machine-readable snapshot for external renderers
//!
//! Neither mutates the tree; layout and drawing belong to the consumer.

pub mod json;
pub mod text;

/// Options shared by the report formats.
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    /// Append each node's fill colour.
    pub show_colors: bool,
    /// List routes that were rejected while building.
    pub show_rejected: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            show_colors: true,
            show_rejected: true,
        }
    }
}
