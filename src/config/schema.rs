//! Configuration schema definitions.
//!
//! Two documents are described here: the gateway file being inspected (an
//! Ocelot-style JSON configuration, defined outside this tool) and the
//! viewer's own TOML settings. All types derive Serde traits.

use serde::{Deserialize, Serialize};

use crate::routing::colors::{Color, DEFAULT_PALETTE};

/// Root of a gateway configuration file.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default, rename_all = "PascalCase")]
pub struct GatewayConfig {
    /// Route definitions, in file order.
    pub routes: Vec<RouteConfig>,

    /// Gateway-wide settings. Carried but not interpreted.
    pub global_configuration: Option<GlobalConfiguration>,
}

/// Gateway-wide settings block.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default, rename_all = "PascalCase")]
pub struct GlobalConfiguration {
    /// Public base URL of the gateway.
    pub base_url: Option<String>,

    /// Header carrying the request id.
    pub request_id_key: Option<String>,
}

/// A single upstream → downstream routing rule.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RouteConfig {
    /// Incoming URL pattern, e.g. `/api/orders/{id}`.
    pub upstream_path_template: String,

    /// Accepted HTTP methods. Compared case-insensitively.
    #[serde(default)]
    pub upstream_http_method: Vec<String>,

    /// Backend targets. Only the first is considered.
    #[serde(default)]
    pub downstream_host_and_ports: Vec<DownstreamHostAndPort>,

    /// Gateway priority. Advisory only.
    #[serde(default = "default_priority")]
    pub priority: i32,

    #[serde(default)]
    pub downstream_path_template: Option<String>,

    #[serde(default)]
    pub downstream_scheme: Option<String>,

    /// Route key used by gateway aggregates.
    #[serde(default)]
    pub key: Option<String>,
}

fn default_priority() -> i32 {
    1
}

impl RouteConfig {
    /// Create a route with the given template, methods and downstream hosts.
    pub fn new<M, H>(template: impl Into<String>, methods: M, hosts: H) -> Self
    where
        M: IntoIterator,
        M::Item: Into<String>,
        H: IntoIterator,
        H::Item: Into<String>,
    {
        Self {
            upstream_path_template: template.into(),
            upstream_http_method: methods.into_iter().map(Into::into).collect(),
            downstream_host_and_ports: hosts
                .into_iter()
                .map(|host| DownstreamHostAndPort {
                    host: host.into(),
                    port: 80,
                })
                .collect(),
            priority: default_priority(),
            downstream_path_template: None,
            downstream_scheme: None,
            key: None,
        }
    }

    /// Set the advisory priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Lower-cased host of the first downstream target.
    pub fn first_downstream_host(&self) -> Option<String> {
        self.downstream_host_and_ports
            .first()
            .map(|target| target.host.to_lowercase())
    }
}

/// A downstream backend address.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct DownstreamHostAndPort {
    pub host: String,

    #[serde(default)]
    pub port: u16,
}

/// Settings for the viewer itself.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ViewerConfig {
    /// Tree display settings.
    pub display: DisplayConfig,

    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Tree display settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Placeholder segment treated as a catch-all, without slashes.
    pub catch_all_token: String,

    /// Colours handed out to downstream hosts in order of first appearance.
    pub palette: Vec<Color>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            catch_all_token: "{everything}".to_string(),
            palette: DEFAULT_PALETTE.to_vec(),
        }
    }
}

/// Output format for log events.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,

    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}
