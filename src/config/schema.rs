//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::context::TraceContextEnricher;

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Event translation settings.
    pub translator: TranslatorConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Event translation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Scheme of the request URI when a host is known ("http" or "https").
    pub scheme: String,

    /// Header copied into the invocation context as the trace ID.
    pub trace_header: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            trace_header: TraceContextEnricher::DEFAULT_TRACE_HEADER.to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default log filter, used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Emit JSON log lines instead of human-readable ones.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}
