//! Plain-text tree outline.
//!
//! ```text
//! /api
//! ├── /{everything}  [GET]  legacy (red)  catch-all
//! └── /items  [GET]  items (blue)  SHADOWED by /api/{everything}
//! ```

use std::fmt::Write;

use crate::report::ReportOptions;
use crate::routing::annotation::MULTI_SERVICE_MARKER;
use crate::routing::{NodeId, RouteSession, RouteTree};

/// Render the whole session as an outline.
pub fn render(session: &RouteSession, options: &ReportOptions) -> String {
    let tree = session.tree();
    let mut out = String::new();

    if tree.is_empty() {
        out.push_str("(no routes)\n");
    }

    for &root in tree.roots() {
        render_node(session, root, "", None, options, &mut out);
    }

    if options.show_rejected && !session.rejected().is_empty() {
        out.push_str("\nRejected routes:\n");
        for rejected in session.rejected() {
            let _ = writeln!(out, "  #{}: {}", rejected.position, rejected.error);
        }
    }

    out
}

/// One line per conflict, `<node> shadowed by <catch-all>`.
pub fn render_conflicts(session: &RouteSession) -> String {
    let tree = session.tree();
    if !session.has_conflicts() {
        return "No shadowed routes.\n".to_string();
    }

    let mut out = String::new();
    for conflict in session.conflicts() {
        let _ = writeln!(
            out,
            "{} shadowed by {}",
            tree[conflict.node].id(),
            tree[conflict.shadowed_by].id()
        );
    }
    out
}

/// Host to colour table, in order of first appearance.
pub fn render_hosts(session: &RouteSession) -> String {
    let mut out = String::new();
    for (host, color) in session.colors().entries() {
        let _ = writeln!(out, "{host}\t{color}");
    }
    out
}

fn render_node(
    session: &RouteSession,
    id: NodeId,
    prefix: &str,
    is_last: Option<bool>,
    options: &ReportOptions,
    out: &mut String,
) {
    let tree = session.tree();
    let connector = match is_last {
        None => "",
        Some(true) => "└── ",
        Some(false) => "├── ",
    };
    let _ = writeln!(out, "{prefix}{connector}{}", describe(session, tree, id, options));

    let child_prefix = match is_last {
        None => prefix.to_string(),
        Some(true) => format!("{prefix}    "),
        Some(false) => format!("{prefix}│   "),
    };

    let children = tree.children(id);
    for (i, &child) in children.iter().enumerate() {
        let last = i + 1 == children.len();
        render_node(session, child, &child_prefix, Some(last), options, out);
    }
}

fn describe(session: &RouteSession, tree: &RouteTree, id: NodeId, options: &ReportOptions) -> String {
    let node = &tree[id];
    let mut line = if is_top_level(tree, id) {
        node.id().to_string()
    } else {
        node.segment().to_string()
    };

    let Some(annotation) = node.annotation() else {
        return line;
    };

    let methods: Vec<&str> = annotation.methods().into_iter().collect();
    let hosts: Vec<&str> = annotation.hosts().into_iter().collect();
    let _ = write!(line, "  [{}]  {}", methods.join(","), hosts.join(","));

    if options.show_colors {
        if let Some(color) = node.color() {
            let _ = write!(line, " ({color})");
        }
    }
    if annotation.is_multi_service() {
        let _ = write!(line, "  {MULTI_SERVICE_MARKER}");
    }
    if annotation.is_catch_all() {
        line.push_str("  catch-all");
    }
    if node.is_conflicted() {
        if let Some(conflict) = session.conflicts().iter().find(|c| c.node == id) {
            let _ = write!(line, "  SHADOWED by {}", tree[conflict.shadowed_by].id());
        }
    }

    line
}

fn is_top_level(tree: &RouteTree, id: NodeId) -> bool {
    tree.parent(id).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{DisplayConfig, GatewayConfig, RouteConfig};

    fn session(routes: Vec<RouteConfig>) -> RouteSession {
        RouteSession::load(
            &GatewayConfig {
                routes,
                global_configuration: None,
            },
            &DisplayConfig::default(),
        )
    }

    #[test]
    fn test_render_outline() {
        let session = session(vec![
            RouteConfig::new("/api/{everything}", ["GET"], ["legacy"]),
            RouteConfig::new("/api/items", ["GET"], ["items"]),
            RouteConfig::new("/health", ["GET"], ["items"]),
        ]);

        let options = ReportOptions {
            show_colors: false,
            show_rejected: true,
        };
        let text = render(&session, &options);
        let expected = "\
/api
├── /{everything}  [GET]  legacy  catch-all
└── /items  [GET]  items  SHADOWED by /api/{everything}
/health  [GET]  items
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_empty() {
        let session = session(Vec::new());
        assert_eq!(render(&session, &ReportOptions::default()), "(no routes)\n");
        assert_eq!(render_conflicts(&session), "No shadowed routes.\n");
    }

    #[test]
    fn test_render_multi_service_and_colors() {
        let session = session(vec![
            RouteConfig::new("/a", ["GET"], ["one"]),
            RouteConfig::new("/a", ["POST"], ["two"]),
        ]);
        let text = render(&session, &ReportOptions::default());
        assert_eq!(text, "/a  [GET,POST]  one,two (blue)  <MultiService>\n");
        assert_eq!(render_hosts(&session), "one\tred\ntwo\tblue\n");
    }

    #[test]
    fn test_render_rejected() {
        let session = session(vec![RouteConfig::new("/", ["GET"], ["x"])]);
        let text = render(&session, &ReportOptions::default());
        assert!(text.contains("Rejected routes:"));
        assert!(text.contains("#0: route template `/` has no path segments"));
    }

    #[test]
    fn test_render_conflicts() {
        let session = session(vec![
            RouteConfig::new("/api/{everything}", ["GET"], ["legacy"]),
            RouteConfig::new("/api/items", ["GET"], ["items"]),
        ]);
        assert_eq!(
            render_conflicts(&session),
            "/api/items shadowed by /api/{everything}\n"
        );
    }
}
