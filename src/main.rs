//! alb-gateway
//!
//! Debugging tool for load balancer target group events: loads a captured
//! event, translates it exactly as a function handler would, and prints the
//! resulting request.
//!
//! ```text
//! event.json → TargetGroupRequest → Translator → http::Request → JSON summary
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use alb_gateway::config::{load_config, GatewayConfig};
use alb_gateway::observability::init_logging;
use alb_gateway::{InvocationContext, RequestExt, TargetGroupRequest, Translator};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};

#[derive(Parser)]
#[command(name = "alb-gateway")]
#[command(about = "Translate load balancer target group events into HTTP requests", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate an event file and print the request
    Inspect {
        /// Path to the event JSON.
        event: PathBuf,

        /// Invocation request ID to place in the base context.
        #[arg(long)]
        request_id: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    init_logging(&config.observability)?;

    tracing::debug!(
        scheme = %config.translator.scheme,
        trace_header = %config.translator.trace_header,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Inspect { event, request_id } => {
            let translator = Translator::from_config(&config.translator);
            let summary = inspect(&translator, &event, request_id).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

async fn inspect(
    translator: &Translator,
    path: &Path,
    request_id: Option<String>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let event: TargetGroupRequest = serde_json::from_str(&content)?;

    let mut base = InvocationContext::new();
    if let Some(id) = request_id {
        base = base.with_request_id(id);
    }

    let request = translator.translate(&base, &event).map_err(|e| {
        tracing::error!(stage = e.stage(), error = %e, path = ?path, "Translation failed");
        e
    })?;

    let host = request.host().to_string();
    let remote_addr = request.remote_addr().to_string();
    let context = request.invocation_context().map(|ctx| {
        json!({
            "request_id": ctx.request_id,
            "invoked_function_arn": ctx.invoked_function_arn,
            "trace_id": ctx.trace_id,
            "target_group_arn": ctx.target_group_arn,
        })
    });

    let (parts, body) = request.into_parts();

    let mut headers = Map::new();
    for (name, value) in parts.headers.iter() {
        headers.insert(
            name.to_string(),
            Value::String(String::from_utf8_lossy(value.as_bytes()).into_owned()),
        );
    }

    let bytes = axum::body::to_bytes(body, usize::MAX).await?;
    let (body, body_base64) = match std::str::from_utf8(&bytes) {
        Ok(text) => (text.to_string(), false),
        Err(_) => (STANDARD.encode(&bytes), true),
    };

    Ok(json!({
        "method": parts.method.as_str(),
        "uri": parts.uri.to_string(),
        "host": host,
        "remote_addr": remote_addr,
        "headers": headers,
        "body": body,
        "body_base64": body_base64,
        "context": context,
    }))
}
