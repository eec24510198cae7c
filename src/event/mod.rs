//! Load balancer invocation events.
//!
//! # Data Flow
//! ```text
//! function platform (JSON payload)
//!     → types.rs (serde model, platform field names)
//!     → http::request (translation into an http::Request)
//! ```
//!
//! # Design Decisions
//! - Maps are ordered (`BTreeMap`) so iteration is deterministic
//! - `null` and missing maps/body decode as empty values

pub mod types;

pub use types::{ElbContext, TargetGroupRequest, TargetGroupRequestContext};
