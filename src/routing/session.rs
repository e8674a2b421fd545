//! A loaded gateway file, ready for inspection.

use std::collections::HashSet;

use serde::Serialize;

use crate::config::schema::{DisplayConfig, GatewayConfig};
use crate::config::validation::ValidationError;
use crate::routing::builder::RouteTreeBuilder;
use crate::routing::colors::HostColorTable;
use crate::routing::shadow::Conflict;
use crate::routing::tree::RouteTree;

/// A route that could not be placed in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRoute {
    /// Index of the route in the gateway file.
    pub position: usize,
    pub template: String,
    #[serde(serialize_with = "serialize_display")]
    pub error: ValidationError,
}

fn serialize_display<S: serde::Serializer>(
    error: &ValidationError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Everything built from one gateway file.
///
/// A session is never updated in place; loading a file again means building
/// a new one.
#[derive(Debug, Clone)]
pub struct RouteSession {
    tree: RouteTree,
    colors: HostColorTable,
    rejected: Vec<RejectedRoute>,
    conflicts: Vec<Conflict>,
}

impl RouteSession {
    pub(crate) fn new(
        tree: RouteTree,
        colors: HostColorTable,
        rejected: Vec<RejectedRoute>,
        conflicts: Vec<Conflict>,
    ) -> Self {
        Self {
            tree,
            colors,
            rejected,
            conflicts,
        }
    }

    /// Build a session from a parsed gateway file.
    pub fn load(config: &GatewayConfig, display: &DisplayConfig) -> Self {
        RouteTreeBuilder::build(config, display)
    }

    pub fn tree(&self) -> &RouteTree {
        &self.tree
    }

    pub fn colors(&self) -> &HostColorTable {
        &self.colors
    }

    pub fn rejected(&self) -> &[RejectedRoute] {
        &self.rejected
    }

    /// Nodes flagged by the shadow check, in node creation order.
    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// Show only the routes of `hosts`; every other annotated node turns
    /// transparent.
    pub fn select_hosts<I, S>(&mut self, hosts: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let selected: HashSet<String> = hosts
            .into_iter()
            .map(|h| h.as_ref().to_lowercase())
            .collect();
        tracing::debug!(selected = selected.len(), "Applying host selection");
        self.tree.apply_host_filter(&self.colors, &selected);
    }
}
