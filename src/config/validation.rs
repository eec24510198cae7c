//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the URI scheme and trace header name are usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>

use axum::http::HeaderName;

use crate::config::schema::GatewayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    UnsupportedScheme(String),
    InvalidTraceHeader(String),
    EmptyLogLevel,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::UnsupportedScheme(s) => {
                write!(f, "translator.scheme must be \"http\" or \"https\", got {:?}", s)
            }
            ValidationError::InvalidTraceHeader(h) => {
                write!(f, "translator.trace_header is not a valid header name: {:?}", h)
            }
            ValidationError::EmptyLogLevel => write!(f, "observability.log_level is empty"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check a deserialized configuration for semantic errors.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let scheme = config.translator.scheme.as_str();
    if scheme != "http" && scheme != "https" {
        errors.push(ValidationError::UnsupportedScheme(scheme.to_string()));
    }

    if HeaderName::from_bytes(config.translator.trace_header.as_bytes()).is_err() {
        errors.push(ValidationError::InvalidTraceHeader(
            config.translator.trace_header.clone(),
        ));
    }

    if config.observability.log_level.trim().is_empty() {
        errors.push(ValidationError::EmptyLogLevel);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = GatewayConfig::default();
        config.translator.scheme = "ftp".into();
        config.translator.trace_header = "bad header".into();
        config.observability.log_level = " ".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::UnsupportedScheme("ftp".into()),
                ValidationError::InvalidTraceHeader("bad header".into()),
                ValidationError::EmptyLogLevel,
            ]
        );
    }
}
