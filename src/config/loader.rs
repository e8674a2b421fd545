//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{GatewayConfig, ViewerConfig};
use crate::config::validation::{validate_viewer_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load a gateway configuration from a JSON file.
///
/// Route-level problems are not reported here; the tree builder rejects
/// those individually.
pub fn load_gateway_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_gateway_config(&content)
}

/// Parse a gateway configuration from JSON text.
///
/// Blank input is treated as a configuration without routes.
pub fn parse_gateway_config(content: &str) -> Result<GatewayConfig, ConfigError> {
    if content.trim().is_empty() {
        return Ok(GatewayConfig::default());
    }
    let config: GatewayConfig = serde_json::from_str(content)?;
    tracing::debug!(routes = config.routes.len(), "Gateway configuration parsed");
    Ok(config)
}

/// Load and validate viewer settings from a TOML file.
pub fn load_viewer_config(path: &Path) -> Result<ViewerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ViewerConfig = toml::from_str(&content)?;

    validate_viewer_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
