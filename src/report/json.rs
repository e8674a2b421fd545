//! JSON snapshot of a session.

use serde::Serialize;

use crate::routing::annotation::RouteAnnotation;
use crate::routing::colors::Color;
use crate::routing::{RejectedRoute, RouteSession};

/// Serializable view of the whole session, with nodes referenced by identifier.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub nodes: Vec<NodeView<'a>>,
    pub roots: Vec<&'a str>,
    pub hosts: Vec<HostView<'a>>,
    pub conflicts: Vec<ConflictView<'a>>,
    pub rejected: &'a [RejectedRoute],
}

#[derive(Debug, Serialize)]
pub struct NodeView<'a> {
    pub id: &'a str,
    pub segment: &'a str,
    pub label: &'a str,
    pub parent: Option<&'a str>,
    pub children: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<&'a RouteAnnotation>,
    pub color: Option<Color>,
    pub conflicted: bool,
}

#[derive(Debug, Serialize)]
pub struct HostView<'a> {
    pub host: &'a str,
    pub color: Color,
}

#[derive(Debug, Serialize)]
pub struct ConflictView<'a> {
    pub node: &'a str,
    pub shadowed_by: &'a str,
}

impl<'a> Snapshot<'a> {
    pub fn new(session: &'a RouteSession) -> Self {
        let tree = session.tree();

        let nodes = tree
            .nodes()
            .map(|(_, node)| NodeView {
                id: node.id(),
                segment: node.segment(),
                label: node.label(),
                parent: node.parent().map(|p| tree[p].id()),
                children: node.children().iter().map(|&c| tree[c].id()).collect(),
                annotation: node.annotation(),
                color: node.color(),
                conflicted: node.is_conflicted(),
            })
            .collect();

        Self {
            nodes,
            roots: tree.roots().iter().map(|&r| tree[r].id()).collect(),
            hosts: session
                .colors()
                .entries()
                .iter()
                .map(|(host, color)| HostView {
                    host: host.as_str(),
                    color: *color,
                })
                .collect(),
            conflicts: session
                .conflicts()
                .iter()
                .map(|c| ConflictView {
                    node: tree[c.node].id(),
                    shadowed_by: tree[c.shadowed_by].id(),
                })
                .collect(),
            rejected: session.rejected(),
        }
    }
}

/// Render the session as pretty-printed JSON.
pub fn render(session: &RouteSession) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Snapshot::new(session))
}
