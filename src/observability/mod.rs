//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! loader / builder / shadow check
//!     → tracing events with structured fields
//!     → logging.rs subscriber (stderr, pretty or JSON)
//! ```

pub mod logging;
