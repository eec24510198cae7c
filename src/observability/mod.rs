//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging through the `tracing` crate
//! - `RUST_LOG` overrides the configured level

pub mod logging;

pub use logging::init_logging;
