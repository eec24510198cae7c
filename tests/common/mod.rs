//! Shared helpers for integration tests.

use alb_gateway::TargetGroupRequest;
use axum::body::Body;
use axum::http::Request;

/// Builder for target group events.
pub struct EventBuilder {
    event: TargetGroupRequest,
}

#[allow(dead_code)]
impl EventBuilder {
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            event: TargetGroupRequest {
                http_method: method.into(),
                path: path.into(),
                ..Default::default()
            },
        }
    }

    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.event
            .query_string_parameters
            .insert(key.into(), value.into());
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.event.headers.insert(name.into(), value.into());
        self
    }

    pub fn body(mut self, body: &str) -> Self {
        self.event.body = body.into();
        self
    }

    pub fn base64_body(mut self, body: &str) -> Self {
        self.event.body = body.into();
        self.event.is_base64_encoded = true;
        self
    }

    pub fn build(self) -> TargetGroupRequest {
        self.event
    }
}

/// Collect a request body into bytes.
#[allow(dead_code)]
pub async fn body_bytes(request: Request<Body>) -> Vec<u8> {
    axum::body::to_bytes(request.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}
