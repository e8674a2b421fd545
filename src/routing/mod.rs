//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! RouteConfig[] (file order)
//!     → builder.rs (order numbers, host colours)
//!     → tree.rs (prefix tree insert, via segment.rs)
//!     → annotation.rs (endpoints + labels on terminal nodes)
//!     → shadow.rs (catch-all conflict pass)
//!     → RouteSession (immutable topology, read by reports)
//! ```
//!
//! # Design Decisions
//! - Single pass over the routes, single-threaded
//! - A node has at most one parent; the shadow check relies on it
//! - Routes are never removed; a new file means a new session

pub mod annotation;
pub mod builder;
pub mod colors;
pub mod segment;
pub mod session;
pub mod shadow;
pub mod tree;

pub use annotation::{NodeData, RouteAnnotation, RouteEndpoint};
pub use builder::RouteTreeBuilder;
pub use colors::{Color, HostColorTable};
pub use session::{RejectedRoute, RouteSession};
pub use shadow::{detect_conflicts, Conflict};
pub use tree::{NodeId, RouteNode, RouteTree};
