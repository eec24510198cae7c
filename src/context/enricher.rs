//! Context enrichment from invocation events.

use std::sync::Arc;

use crate::context::InvocationContext;
use crate::event::TargetGroupRequest;

/// Derives the request context from a base context and the event.
///
/// Implementations must be total and must not mutate shared state.
pub trait ContextEnricher: Send + Sync {
    fn enrich(&self, base: &InvocationContext, event: &TargetGroupRequest) -> InvocationContext;
}

impl<F> ContextEnricher for F
where
    F: Fn(&InvocationContext, &TargetGroupRequest) -> InvocationContext + Send + Sync,
{
    fn enrich(&self, base: &InvocationContext, event: &TargetGroupRequest) -> InvocationContext {
        self(base, event)
    }
}

/// Default enricher: trace header, target group ARN and the raw event.
#[derive(Debug, Clone)]
pub struct TraceContextEnricher {
    trace_header: String,
}

impl TraceContextEnricher {
    pub const DEFAULT_TRACE_HEADER: &'static str = "x-amzn-trace-id";

    pub fn new(trace_header: impl Into<String>) -> Self {
        Self {
            trace_header: trace_header.into(),
        }
    }
}

impl Default for TraceContextEnricher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TRACE_HEADER)
    }
}

impl ContextEnricher for TraceContextEnricher {
    fn enrich(&self, base: &InvocationContext, event: &TargetGroupRequest) -> InvocationContext {
        let mut ctx = base.clone();
        if let Some(trace_id) = event.header(&self.trace_header) {
            ctx.trace_id = Some(trace_id.to_string());
        }
        if let Some(arn) = event.target_group_arn() {
            ctx.target_group_arn = Some(arn.to_string());
        }
        ctx.event = Some(Arc::new(event.clone()));
        ctx
    }
}
