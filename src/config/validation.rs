//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Route preconditions: a downstream target and a non-empty template
//! - Viewer settings: palette, catch-all token, log level
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure: config in, errors out
//! - A rejected route never aborts the load; the caller skips it

use thiserror::Error;

use crate::config::schema::{GatewayConfig, RouteConfig, ViewerConfig};
use crate::routing::segment::tokenize;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A semantic problem in a route or in the viewer settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route `{template}` has no downstream targets")]
    NoDownstream { template: String },

    #[error("route template `{template}` has no path segments")]
    EmptyTemplate { template: String },

    #[error("palette must contain at least one colour")]
    EmptyPalette,

    #[error("catch-all token `{0}` must be a single non-empty segment")]
    InvalidCatchAllToken(String),

    #[error("unknown log level `{0}`")]
    UnknownLogLevel(String),
}

/// Check the preconditions the route tree relies on.
pub fn validate_route(route: &RouteConfig) -> Result<(), ValidationError> {
    if route.downstream_host_and_ports.is_empty() {
        return Err(ValidationError::NoDownstream {
            template: route.upstream_path_template.clone(),
        });
    }
    if tokenize(&route.upstream_path_template).is_empty() {
        return Err(ValidationError::EmptyTemplate {
            template: route.upstream_path_template.clone(),
        });
    }
    Ok(())
}

/// Every rejected route with its position in the file.
pub fn validate_routes(config: &GatewayConfig) -> Vec<(usize, ValidationError)> {
    config
        .routes
        .iter()
        .enumerate()
        .filter_map(|(position, route)| validate_route(route).err().map(|e| (position, e)))
        .collect()
}

/// Validate the viewer settings.
pub fn validate_viewer_config(config: &ViewerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.display.palette.is_empty() {
        errors.push(ValidationError::EmptyPalette);
    }

    let token = &config.display.catch_all_token;
    if token.is_empty() || token.contains('/') {
        errors.push(ValidationError::InvalidCatchAllToken(token.clone()));
    }

    let level = config.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(config.logging.level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_route() {
        let route = RouteConfig::new("/api/items", ["GET"], ["items"]);
        assert_eq!(validate_route(&route), Ok(()));
    }

    #[test]
    fn test_route_without_downstream() {
        let route = RouteConfig::new("/api/items", ["GET"], Vec::<String>::new());
        assert!(matches!(
            validate_route(&route),
            Err(ValidationError::NoDownstream { .. })
        ));
    }

    #[test]
    fn test_route_with_empty_template() {
        for template in ["", "/", "///"] {
            let route = RouteConfig::new(template, ["GET"], ["svc"]);
            assert!(matches!(
                validate_route(&route),
                Err(ValidationError::EmptyTemplate { .. })
            ));
        }
    }

    #[test]
    fn test_validate_routes_reports_positions() {
        let config = GatewayConfig {
            routes: vec![
                RouteConfig::new("/ok", ["GET"], ["svc"]),
                RouteConfig::new("/", ["GET"], ["svc"]),
                RouteConfig::new("/also-ok", ["GET"], ["svc"]),
                RouteConfig::new("/orphan", ["GET"], Vec::<String>::new()),
            ],
            global_configuration: None,
        };

        let rejected = validate_routes(&config);
        let positions: Vec<usize> = rejected.iter().map(|(p, _)| *p).collect();
        assert_eq!(positions, vec![1, 3]);
    }

    #[test]
    fn test_viewer_config_collects_all_errors() {
        let mut config = ViewerConfig::default();
        config.display.palette.clear();
        config.display.catch_all_token = "a/b".to_string();
        config.logging.level = "loud".to_string();

        let errors = validate_viewer_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::EmptyPalette));
    }

    #[test]
    fn test_default_viewer_config_is_valid() {
        assert!(validate_viewer_config(&ViewerConfig::default()).is_ok());
    }
}
