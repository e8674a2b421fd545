//! Prefix tree of upstream path templates.
//!
//! Nodes live in an arena and are addressed by [NodeId]. Every node is keyed
//! by its identifier, the concatenation of its segments with a leading `/`
//! each (`/api/{id}`). Because an identifier fixes the whole ancestor path,
//! a node has at most one parent; top-level nodes have none.
//!
//! ```text
//! /api ─┬─ /api/items
//!       └─ /api/{everything}
//! /health
//! ```

use std::collections::{HashMap, HashSet};
use std::ops::Index;

use crate::config::schema::RouteConfig;
use crate::config::validation::ValidationError;
use crate::routing::annotation::{NodeData, RouteAnnotation, RouteEndpoint};
use crate::routing::colors::{Color, HostColorTable};
use crate::routing::segment::tokenize;

/// Index of a node in the tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node of the route tree.
#[derive(Debug, Clone)]
pub struct RouteNode {
    id: String,
    segment: String,
    label: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
    color: Option<Color>,
    conflicted: bool,
}

impl RouteNode {
    fn new(id: String, segment: String, parent: Option<NodeId>) -> Self {
        Self {
            id,
            label: segment.clone(),
            segment,
            parent,
            children: Vec::new(),
            data: NodeData::Structural,
            color: None,
            conflicted: false,
        }
    }

    /// Full identifier, e.g. `/api/items`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Last segment with its leading slash, e.g. `/items`.
    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// Display label; equals the segment for structural nodes.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in order of first insertion.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn data(&self) -> &NodeData {
        &self.data
    }

    pub fn annotation(&self) -> Option<&RouteAnnotation> {
        self.data.annotation()
    }

    /// Fill colour, if the node has been shaded.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn is_conflicted(&self) -> bool {
        self.conflicted
    }

    /// Host of the first route registered at this node.
    pub fn first_host(&self) -> Option<&str> {
        self.annotation().and_then(RouteAnnotation::first_host)
    }
}

/// Prefix tree built from a gateway's upstream templates.
#[derive(Debug, Clone, Default)]
pub struct RouteTree {
    nodes: Vec<RouteNode>,
    index: HashMap<String, NodeId>,
    roots: Vec<NodeId>,
}

impl RouteTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&RouteNode> {
        self.nodes.get(id.0)
    }

    /// Look a node up by identifier. The identifier is compared lower-cased.
    pub fn find(&self, id: &str) -> Option<NodeId> {
        self.index.get(&id.to_lowercase()).copied()
    }

    /// Look a node up by identifier and borrow it.
    pub fn node(&self, id: &str) -> Option<&RouteNode> {
        self.find(id).map(|id| &self.nodes[id.0])
    }

    /// All nodes with their ids, in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &RouteNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Nodes that at least one route ends at.
    pub fn annotated(&self) -> impl Iterator<Item = (NodeId, &RouteNode)> {
        self.nodes().filter(|(_, n)| n.data.is_route())
    }

    /// Top-level nodes, in order of first insertion.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Number of parent/child edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.children.len()).sum()
    }

    /// Insert `route` with registration order `order`.
    ///
    /// Prefix nodes are created on demand and shared with earlier routes.
    /// The node at the end of the template receives a [RouteEndpoint] and
    /// its label is recomputed. `catch_all_token` is the placeholder segment,
    /// without slashes, that marks a terminal node as a catch-all.
    pub fn insert(
        &mut self,
        route: &RouteConfig,
        order: u32,
        catch_all_token: &str,
    ) -> Result<NodeId, ValidationError> {
        let template = &route.upstream_path_template;
        let endpoint = RouteEndpoint::from_route(route, order).ok_or_else(|| {
            ValidationError::NoDownstream {
                template: template.clone(),
            }
        })?;
        let segments = tokenize(template);

        let mut previous: Option<NodeId> = None;
        let mut node_id = String::new();

        for part in &segments {
            let segment = format!("/{}", part);
            node_id.push_str(&segment);

            let current = match self.index.get(&node_id) {
                Some(&existing) => existing,
                None => self.add_node(node_id.clone(), segment, previous),
            };

            if let Some(parent) = previous {
                self.link(parent, current);
            }

            previous = Some(current);
        }

        let Some(terminal) = previous else {
            return Err(ValidationError::EmptyTemplate {
                template: template.clone(),
            });
        };

        let catch_all_suffix = format!("/{}", catch_all_token.to_lowercase());
        let node = &mut self.nodes[terminal.0];
        if let NodeData::Structural = node.data {
            let is_catch_all = node.id.ends_with(&catch_all_suffix);
            node.data = NodeData::Route(RouteAnnotation::new(node.label.clone(), is_catch_all));
        }
        if let Some(annotation) = node.data.annotation_mut() {
            annotation.push(endpoint);
            node.label = annotation.label();
        }

        tracing::debug!(
            node = %node.id,
            order,
            endpoints = node.annotation().map_or(0, |a| a.endpoints().len()),
            "Route inserted"
        );

        Ok(terminal)
    }

    fn add_node(&mut self, id: String, segment: String, parent: Option<NodeId>) -> NodeId {
        let node_id = NodeId(self.nodes.len());
        self.index.insert(id.clone(), node_id);
        self.nodes.push(RouteNode::new(id, segment, parent));
        if parent.is_none() {
            self.roots.push(node_id);
        }
        node_id
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        let children = &mut self.nodes[parent.0].children;
        if !children.contains(&child) {
            children.push(child);
        }
    }

    pub(crate) fn set_color(&mut self, id: NodeId, color: Color) {
        self.nodes[id.0].color = Some(color);
    }

    pub(crate) fn set_conflicted(&mut self, id: NodeId, conflicted: bool) {
        self.nodes[id.0].conflicted = conflicted;
    }

    /// Recolour annotated nodes by the host of their first route: the host's
    /// colour when it is in `selected`, [Color::Transparent] otherwise.
    ///
    /// Structural nodes are left untouched.
    pub fn apply_host_filter(&mut self, colors: &HostColorTable, selected: &HashSet<String>) {
        let selected: HashSet<String> = selected.iter().map(|h| h.to_lowercase()).collect();

        for node in &mut self.nodes {
            let Some(host) = node.first_host() else {
                continue;
            };

            let color = if selected.contains(host) {
                colors.get(host).unwrap_or(Color::Transparent)
            } else {
                Color::Transparent
            };
            node.color = Some(color);
        }
    }
}

impl Index<NodeId> for RouteTree {
    type Output = RouteNode;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "{everything}";

    fn route(template: &str, methods: &[&str], host: &str) -> RouteConfig {
        RouteConfig::new(template, methods.iter().copied(), [host])
    }

    #[test]
    fn test_insert_creates_prefix_chain() {
        let mut tree = RouteTree::new();
        let terminal = tree.insert(&route("/api/v1/items", &["GET"], "svc"), 0, TOKEN).unwrap();

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.roots().len(), 1);
        assert_eq!(tree[terminal].id(), "/api/v1/items");
        assert_eq!(tree[terminal].segment(), "/items");

        let v1 = tree.parent(terminal).unwrap();
        assert_eq!(tree[v1].id(), "/api/v1");
        assert!(tree[v1].annotation().is_none());
        assert_eq!(tree[v1].label(), "/v1");

        let api = tree.parent(v1).unwrap();
        assert_eq!(tree.parent(api), None);
        assert_eq!(tree.roots(), &[api]);
    }

    #[test]
    fn test_prefix_sharing() {
        let mut tree = RouteTree::new();
        tree.insert(&route("/api/users", &["GET"], "svc"), 0, TOKEN).unwrap();
        tree.insert(&route("/api/orders", &["GET"], "svc"), 1, TOKEN).unwrap();

        let api = tree.find("/api").unwrap();
        assert_eq!(tree.len(), 3);
        let children: Vec<&str> = tree.children(api).iter().map(|&c| tree[c].id()).collect();
        assert_eq!(children, vec!["/api/users", "/api/orders"]);
    }

    #[test]
    fn test_identical_insert_does_not_duplicate() {
        let mut tree = RouteTree::new();
        let r = route("/api/items", &["GET"], "svc");
        tree.insert(&r, 0, TOKEN).unwrap();
        let nodes = tree.len();
        let edges = tree.edge_count();

        tree.insert(&r, 1, TOKEN).unwrap();
        assert_eq!(tree.len(), nodes);
        assert_eq!(tree.edge_count(), edges);
        assert_eq!(tree.roots().len(), 1);
        // The second registration is still recorded.
        let items = tree.node("/api/items").unwrap();
        assert_eq!(items.annotation().unwrap().endpoints().len(), 2);
    }

    #[test]
    fn test_templates_are_case_and_slash_insensitive() {
        let mut tree = RouteTree::new();
        let a = tree.insert(&route("/API/Items/", &["GET"], "svc"), 0, TOKEN).unwrap();
        let b = tree.insert(&route("api//items", &["POST"], "svc"), 1, TOKEN).unwrap();
        assert_eq!(a, b);
        assert_eq!(tree[a].label(), "/items\nGET,POST");
    }

    #[test]
    fn test_catch_all_detection() {
        let mut tree = RouteTree::new();
        let wildcard = tree.insert(&route("/api/{everything}", &["GET"], "x"), 0, TOKEN).unwrap();
        let param = tree.insert(&route("/api/{id}", &["GET"], "x"), 1, TOKEN).unwrap();

        assert!(tree[wildcard].annotation().unwrap().is_catch_all());
        assert!(!tree[param].annotation().unwrap().is_catch_all());
    }

    #[test]
    fn test_custom_catch_all_token() {
        let mut tree = RouteTree::new();
        let node = tree.insert(&route("/api/{CatchAll}", &["GET"], "x"), 0, "{catchall}").unwrap();
        assert!(tree[node].annotation().unwrap().is_catch_all());
    }

    #[test]
    fn test_intermediate_node_becomes_terminal() {
        let mut tree = RouteTree::new();
        tree.insert(&route("/api/items/{id}", &["GET"], "svc"), 0, TOKEN).unwrap();
        let items = tree.find("/api/items").unwrap();
        assert!(tree[items].annotation().is_none());

        tree.insert(&route("/api/items", &["POST"], "svc"), 1, TOKEN).unwrap();
        assert_eq!(tree[items].label(), "/items\nPOST");
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_rejected_routes_leave_tree_untouched() {
        let mut tree = RouteTree::new();
        let empty = tree.insert(&route("///", &["GET"], "svc"), 0, TOKEN);
        assert_eq!(
            empty,
            Err(ValidationError::EmptyTemplate {
                template: "///".to_string()
            })
        );

        let orphan = RouteConfig::new("/a/b", ["GET"], Vec::<String>::new());
        assert_eq!(
            tree.insert(&orphan, 0, TOKEN),
            Err(ValidationError::NoDownstream {
                template: "/a/b".to_string()
            })
        );
        assert!(tree.is_empty());
    }

    #[test]
    fn test_insert_rejects_like_validation() {
        use crate::config::validation::validate_route;

        let routes = [
            route("", &["GET"], "svc"),
            RouteConfig::new("//", ["GET"], Vec::<String>::new()),
            RouteConfig::new("/x", ["GET"], Vec::<String>::new()),
            route("/ok", &["GET"], "svc"),
        ];
        for candidate in &routes {
            let mut tree = RouteTree::new();
            let inserted = tree.insert(candidate, 0, TOKEN).map(|_| ());
            assert_eq!(inserted, validate_route(candidate));
        }
    }

    #[test]
    fn test_apply_host_filter() {
        let mut tree = RouteTree::new();
        let mut colors = HostColorTable::default();
        colors.color_for("a");
        colors.color_for("b");

        let a = tree.insert(&route("/x/a", &["GET"], "A"), 0, TOKEN).unwrap();
        let b = tree.insert(&route("/x/b", &["GET"], "b"), 1, TOKEN).unwrap();

        let selected: HashSet<String> = ["a".to_string()].into_iter().collect();
        tree.apply_host_filter(&colors, &selected);

        assert_eq!(tree[a].color(), Some(Color::Red));
        assert_eq!(tree[b].color(), Some(Color::Transparent));
        assert_eq!(tree.node("/x").unwrap().color(), None);
    }
}
