//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! gateway file (Ocelot JSON)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (per-route precondition checks)
//!     → GatewayConfig (plain route list handed to the routing core)
//!
//! viewer settings (TOML, optional)
//!     → loader.rs → validation.rs → ViewerConfig
//!
//! On file change (watch mode):
//!     watcher.rs detects change
//!     → loader.rs loads new gateway file
//!     → session rebuilt from scratch
//! ```
//!
//! # Design Decisions
//! - The gateway schema is external; unknown keys are ignored
//! - All viewer settings have defaults to allow running without a settings file
//! - Invalid routes are rejected individually, never the whole file

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use schema::DisplayConfig;
pub use schema::DownstreamHostAndPort;
pub use schema::GatewayConfig;
pub use schema::LogFormat;
pub use schema::LoggingConfig;
pub use schema::RouteConfig;
pub use schema::ViewerConfig;
