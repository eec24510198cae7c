//! Request-scoped invocation context.
//!
//! # Responsibilities
//! - Carry invocation metadata alongside the translated request
//! - Derive trace and target group details from the incoming event
//!
//! # Design Decisions
//! - Named optional fields instead of an open key-value bag
//! - Enrichment is total: a missing value stays `None`, it never fails

pub mod enricher;

pub use enricher::{ContextEnricher, TraceContextEnricher};

use std::sync::Arc;

use crate::event::TargetGroupRequest;

/// Metadata attached to every translated request as an extension.
#[derive(Debug, Clone, Default)]
pub struct InvocationContext {
    /// Platform request ID of the function invocation.
    pub request_id: Option<String>,

    /// ARN of the invoked function.
    pub invoked_function_arn: Option<String>,

    /// Distributed trace header value.
    pub trace_id: Option<String>,

    /// Target group that forwarded the request.
    pub target_group_arn: Option<String>,

    /// The event the request was translated from.
    pub event: Option<Arc<TargetGroupRequest>>,
}

impl InvocationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn with_invoked_function_arn(mut self, arn: impl Into<String>) -> Self {
        self.invoked_function_arn = Some(arn.into());
        self
    }
}
