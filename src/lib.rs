//! Load balancer target group events as HTTP requests.
//!
//! Translates the event a function platform receives when a load balancer
//! target group forwards an HTTP request into an `http::Request` that any
//! `tower::Service` (for example an `axum::Router`) can handle.

pub mod config;
pub mod context;
pub mod event;
pub mod http;
pub mod observability;

pub use config::GatewayConfig;
pub use context::{ContextEnricher, InvocationContext, TraceContextEnricher};
pub use event::TargetGroupRequest;
pub use http::{new_request, RemoteAddr, RequestExt, TranslateError, Translator};
