//! Route tree construction.
//!
//! # Responsibilities
//! - Feed every route of a gateway file into a fresh [RouteTree]
//! - Hand out registration order numbers and host colours
//! - Reject routes the tree cannot represent, without aborting the build
//!
//! # Design Decisions
//! - The order counter belongs to the builder, one per loaded file
//! - Rejected routes consume neither an order number nor a colour
//! - The shadow check runs once the whole tree exists

use crate::config::schema::{DisplayConfig, GatewayConfig, RouteConfig};
use crate::config::validation::ValidationError;
use crate::routing::colors::HostColorTable;
use crate::routing::session::{RejectedRoute, RouteSession};
use crate::routing::shadow::detect_conflicts;
use crate::routing::tree::{NodeId, RouteTree};

/// Incrementally builds a route tree and its host colour table.
#[derive(Debug)]
pub struct RouteTreeBuilder {
    tree: RouteTree,
    colors: HostColorTable,
    catch_all_token: String,
    next_order: u32,
}

impl Default for RouteTreeBuilder {
    fn default() -> Self {
        Self::new(&DisplayConfig::default())
    }
}

impl RouteTreeBuilder {
    pub fn new(display: &DisplayConfig) -> Self {
        Self {
            tree: RouteTree::new(),
            colors: HostColorTable::new(display.palette.clone()),
            catch_all_token: display.catch_all_token.clone(),
            next_order: 0,
        }
    }

    /// Insert one route with the next registration order.
    ///
    /// On success the terminal node is shaded with the route's host colour.
    pub fn insert(&mut self, route: &RouteConfig) -> Result<NodeId, ValidationError> {
        let order = self.next_order;
        let node = self.tree.insert(route, order, &self.catch_all_token)?;
        self.next_order += 1;

        if let Some(host) = route.first_downstream_host() {
            let color = self.colors.color_for(&host);
            self.tree.set_color(node, color);
        }

        Ok(node)
    }

    /// Order number the next accepted route will get.
    pub fn next_order(&self) -> u32 {
        self.next_order
    }

    pub fn tree(&self) -> &RouteTree {
        &self.tree
    }

    pub fn colors(&self) -> &HostColorTable {
        &self.colors
    }

    /// Finish building: run the shadow check and wrap everything in a session.
    pub fn finish(mut self, rejected: Vec<RejectedRoute>) -> RouteSession {
        let conflicts = detect_conflicts(&mut self.tree);
        RouteSession::new(self.tree, self.colors, rejected, conflicts)
    }

    /// Build a complete session from a gateway file.
    pub fn build(config: &GatewayConfig, display: &DisplayConfig) -> RouteSession {
        let mut builder = Self::new(display);
        let mut rejected = Vec::new();

        for (position, route) in config.routes.iter().enumerate() {
            if let Err(error) = builder.insert(route) {
                tracing::warn!(
                    position,
                    template = %route.upstream_path_template,
                    error = %error,
                    "Route rejected"
                );
                rejected.push(RejectedRoute {
                    position,
                    template: route.upstream_path_template.clone(),
                    error,
                });
            }
        }

        tracing::info!(
            routes = config.routes.len(),
            accepted = builder.next_order,
            rejected = rejected.len(),
            nodes = builder.tree.len(),
            hosts = builder.colors.len(),
            "Route tree built"
        );

        builder.finish(rejected)
    }
}
