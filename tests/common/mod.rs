//! Shared helpers for integration tests.

use std::path::{Path, PathBuf};

use route_viewer::config::schema::{DisplayConfig, GatewayConfig, RouteConfig};
use route_viewer::RouteSession;

/// Path of a file under `tests/fixtures`.
#[allow(dead_code)]
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Route with a comma-separated method list and a single downstream host.
#[allow(dead_code)]
pub fn route(template: &str, methods: &str, host: &str) -> RouteConfig {
    let methods = methods.split(',').filter(|m| !m.is_empty());
    RouteConfig::new(template, methods, [host])
}

/// Build a session from routes listed in registration order.
#[allow(dead_code)]
pub fn session(routes: Vec<RouteConfig>) -> RouteSession {
    let gateway = GatewayConfig {
        routes,
        global_configuration: None,
    };
    RouteSession::load(&gateway, &DisplayConfig::default())
}

/// Write `content` to a file unique to this test process.
#[allow(dead_code)]
pub fn write_temp(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("route-viewer-it-{}-{}", std::process::id(), name));
    std::fs::write(&path, content).unwrap();
    path
}
