//! Translation errors.

use thiserror::Error;

/// Reasons an event path is not a valid URL reference.
#[derive(Debug, Error)]
pub enum PathError {
    #[error(transparent)]
    Url(#[from] url::ParseError),

    #[error("invalid URL escape {0:?}")]
    InvalidEscape(String),

    #[error("invalid control character in URL")]
    ControlCharacter,
}

/// Errors that can occur while translating an event into a request.
///
/// Every variant is terminal; no partial request is produced.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The event path is not a valid URI reference.
    #[error("parsing path: {0}")]
    PathParse(#[source] PathError),

    /// The body was flagged as base64 but failed to decode.
    #[error("decoding base64 body: {0}")]
    BodyDecode(#[source] base64::DecodeError),

    /// Method, URI or headers were rejected when building the request.
    #[error("creating request: {0}")]
    RequestConstruction(#[source] axum::http::Error),
}

impl TranslateError {
    /// Short label of the failing stage.
    pub fn stage(&self) -> &'static str {
        match self {
            TranslateError::PathParse(_) => "parsing path",
            TranslateError::BodyDecode(_) => "decoding base64 body",
            TranslateError::RequestConstruction(_) => "creating request",
        }
    }
}

/// Result type for event translation.
pub type TranslateResult<T> = Result<T, TranslateError>;
