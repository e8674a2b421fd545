//! Per-node routing metadata.
//!
//! # Responsibilities
//! - Record every route that terminates at a node, in registration order
//! - Derive the node's display label from the full endpoint set
//! - Decide whether a catch-all node shadows another node
//!
//! # Design Decisions
//! - Annotations are append-only; the label is recomputed on every append
//! - HTTP methods are stored upper-cased so set operations ignore case

use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::schema::RouteConfig;

/// Marker line appended to labels of nodes served by several hosts.
pub const MULTI_SERVICE_MARKER: &str = "<MultiService>";

/// What a tree node carries besides its position.
#[derive(Debug, Clone, Default)]
pub enum NodeData {
    /// Prefix node no route ends at.
    #[default]
    Structural,
    /// At least one route ends here.
    Route(RouteAnnotation),
}

impl NodeData {
    pub fn annotation(&self) -> Option<&RouteAnnotation> {
        match self {
            NodeData::Structural => None,
            NodeData::Route(annotation) => Some(annotation),
        }
    }

    pub fn annotation_mut(&mut self) -> Option<&mut RouteAnnotation> {
        match self {
            NodeData::Structural => None,
            NodeData::Route(annotation) => Some(annotation),
        }
    }

    pub fn is_route(&self) -> bool {
        matches!(self, NodeData::Route(_))
    }
}

/// One route registered at a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEndpoint {
    /// Lower-cased downstream host.
    pub host: String,
    /// Global registration order.
    pub order: u32,
    /// Copied from the route; not used in comparisons.
    pub priority: i32,
    /// Upper-cased, de-duplicated HTTP methods.
    pub methods: BTreeSet<String>,
}

impl RouteEndpoint {
    /// Build an endpoint from a route that is known to have a downstream target.
    pub fn new(host: &str, methods: &[String], priority: i32, order: u32) -> Self {
        Self {
            host: host.to_lowercase(),
            order,
            priority,
            methods: methods.iter().map(|m| m.to_uppercase()).collect(),
        }
    }

    /// Endpoint for `route`, or `None` when it has no downstream target.
    pub fn from_route(route: &RouteConfig, order: u32) -> Option<Self> {
        let host = route.first_downstream_host()?;
        Some(Self::new(
            &host,
            &route.upstream_http_method,
            route.priority,
            order,
        ))
    }

    /// True if both endpoints accept at least one common method.
    pub fn shares_method_with(&self, other: &RouteEndpoint) -> bool {
        !self.methods.is_disjoint(&other.methods)
    }
}

/// Routing metadata of a terminal node.
#[derive(Debug, Clone, Serialize)]
pub struct RouteAnnotation {
    segment: String,
    is_catch_all: bool,
    endpoints: Vec<RouteEndpoint>,
}

impl RouteAnnotation {
    pub fn new(segment: impl Into<String>, is_catch_all: bool) -> Self {
        Self {
            segment: segment.into(),
            is_catch_all,
            endpoints: Vec::new(),
        }
    }

    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// True if the node's segment is the catch-all placeholder.
    pub fn is_catch_all(&self) -> bool {
        self.is_catch_all
    }

    /// Endpoints in registration order.
    pub fn endpoints(&self) -> &[RouteEndpoint] {
        &self.endpoints
    }

    pub fn push(&mut self, endpoint: RouteEndpoint) {
        self.endpoints.push(endpoint);
    }

    /// Union of the methods of every endpoint, sorted.
    pub fn methods(&self) -> BTreeSet<&str> {
        self.endpoints
            .iter()
            .flat_map(|e| e.methods.iter().map(String::as_str))
            .collect()
    }

    /// Distinct downstream hosts, sorted.
    pub fn hosts(&self) -> BTreeSet<&str> {
        self.endpoints.iter().map(|e| e.host.as_str()).collect()
    }

    pub fn is_multi_service(&self) -> bool {
        self.hosts().len() > 1
    }

    /// Host of the first registered endpoint.
    pub fn first_host(&self) -> Option<&str> {
        self.endpoints.first().map(|e| e.host.as_str())
    }

    /// Display label: segment, then the comma-joined methods, then the
    /// multi-service marker when more than one host serves the node.
    pub fn label(&self) -> String {
        let methods: Vec<&str> = self.methods().into_iter().collect();
        let mut label = format!("{}\n{}", self.segment, methods.join(","));
        if self.is_multi_service() {
            label.push('\n');
            label.push_str(MULTI_SERVICE_MARKER);
        }
        label
    }

    /// Whether this node, as a catch-all, shadows `other`.
    ///
    /// Only the first endpoint of `self` with a method overlap decides: for
    /// it, the first overlapping endpoint of `other` is found and a collision
    /// is reported when that endpoint was registered after this one, so a
    /// first-match router would reach the catch-all first.
    pub fn collides_with(&self, other: &RouteAnnotation) -> bool {
        if !self.is_catch_all {
            return false;
        }

        for general in &self.endpoints {
            let overlapping = other
                .endpoints
                .iter()
                .find(|specific| specific.shares_method_with(general));

            if let Some(specific) = overlapping {
                return specific.order > general.order;
            }
        }

        false
    }
}
