//! Translated requests handed to a tower service.

use alb_gateway::{InvocationContext, RemoteAddr, Translator};
use axum::extract::{Extension, Query};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use std::collections::HashMap;
use tower::ServiceExt;

mod common;

use common::EventBuilder;

fn app() -> Router {
    Router::new()
        .route(
            "/greet",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                format!("hello {}", params.get("name").cloned().unwrap_or_default())
            }),
        )
        .route(
            "/echo",
            post(
                |Extension(addr): Extension<RemoteAddr>,
                 Extension(ctx): Extension<InvocationContext>,
                 body: String| async move {
                    format!(
                        "{} {} {}",
                        addr.0,
                        ctx.trace_id.unwrap_or_default(),
                        body
                    )
                },
            ),
        )
}

async fn response_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_router_sees_merged_query() {
    let event = EventBuilder::new("GET", "/greet?name=path")
        .query("name", "event")
        .header("host", "api.example.com")
        .build();

    let request = Translator::new()
        .translate(&InvocationContext::new(), &event)
        .unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_text(response).await, "hello event");
}

#[tokio::test]
async fn test_router_sees_extensions_and_body() {
    let event = EventBuilder::new("POST", "/echo")
        .header("host", "api.example.com")
        .header("x-forwarded-for", "192.0.2.1")
        .header("x-amzn-trace-id", "Root=1-abc")
        .base64_body("cGluZw==")
        .build();

    let request = Translator::new()
        .translate(&InvocationContext::new(), &event)
        .unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_text(response).await, "192.0.2.1 Root=1-abc ping");
}

#[tokio::test]
async fn test_hostless_request_still_routes() {
    let event = EventBuilder::new("GET", "/greet").build();

    let request = Translator::new()
        .translate(&InvocationContext::new(), &event)
        .unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_text(response).await, "hello ");
}
