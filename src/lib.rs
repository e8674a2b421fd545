//! Gateway route tree viewer.
//!
//! Loads an Ocelot-style gateway configuration, arranges its upstream path
//! templates into a prefix tree and flags routes that a catch-all route
//! registered elsewhere in the tree may intercept.

pub mod config;
pub mod observability;
pub mod report;
pub mod routing;

pub use config::schema::{GatewayConfig, ViewerConfig};
pub use routing::{RouteSession, RouteTree, RouteTreeBuilder};
