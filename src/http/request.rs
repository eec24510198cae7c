//! Translation of target group events into HTTP requests.
//!
//! # Responsibilities
//! - Parse the event path and merge its query with the event's parameters
//! - Decode base64 bodies
//! - Copy headers verbatim, infer Content-Length when missing
//! - Resolve host and remote address from headers
//! - Attach the enriched invocation context
//!
//! # Design Decisions
//! - The Host header is the only source of the URI authority; a host in the
//!   path is discarded
//! - The host lives only in the URI, so `uri().authority()` and `host()` agree
//! - Query keys are serialized in sorted order so output is deterministic
//! - Errors are returned with a stage label and never logged here

use std::collections::BTreeMap;

use axum::body::Body;
use axum::http::header::{CONTENT_LENGTH, HOST};
use axum::http::uri::{Authority, Scheme};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Request, Uri};
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use url::{form_urlencoded, Url};

use crate::config::TranslatorConfig;
use crate::context::{ContextEnricher, InvocationContext, TraceContextEnricher};
use crate::event::TargetGroupRequest;
use crate::http::error::{PathError, TranslateError, TranslateResult};

/// Base that host-relative paths are resolved against. Only its path and
/// query survive; the authority is replaced by the Host header.
const PATH_BASE: &str = "https://target.invalid/";

/// Standard padded base64 that tolerates non-zero trailing bits.
const BODY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Client address taken from the `x-forwarded-for` header.
///
/// Stored as a request extension; empty when the header is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteAddr(pub String);

/// Accessors for the values the translator attaches to a request.
pub trait RequestExt {
    /// Client address, or `""` if unknown.
    fn remote_addr(&self) -> &str;

    /// Host the request was addressed to, or `""` if the event had none.
    fn host(&self) -> &str;

    /// Context produced by the enricher.
    fn invocation_context(&self) -> Option<&InvocationContext>;
}

impl<B> RequestExt for Request<B> {
    fn remote_addr(&self) -> &str {
        self.extensions()
            .get::<RemoteAddr>()
            .map(|addr| addr.0.as_str())
            .unwrap_or("")
    }

    fn host(&self) -> &str {
        self.uri().authority().map(Authority::as_str).unwrap_or("")
    }

    fn invocation_context(&self) -> Option<&InvocationContext> {
        self.extensions().get::<InvocationContext>()
    }
}

/// Translates target group events into `http::Request`s.
#[derive(Debug, Clone)]
pub struct Translator<E = TraceContextEnricher> {
    scheme: Scheme,
    enricher: E,
}

impl Translator {
    /// Create a translator with default settings.
    pub fn new() -> Self {
        Self::from_config(&TranslatorConfig::default())
    }

    /// Create a translator from configuration, using the default enricher.
    pub fn from_config(config: &TranslatorConfig) -> Self {
        let scheme = if config.scheme.eq_ignore_ascii_case("http") {
            Scheme::HTTP
        } else {
            Scheme::HTTPS
        };
        Self {
            scheme,
            enricher: TraceContextEnricher::new(config.trace_header.clone()),
        }
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ContextEnricher> Translator<E> {
    /// Create a translator with a custom context enricher and `https` scheme.
    pub fn with_enricher(enricher: E) -> Self {
        Self {
            scheme: Scheme::HTTPS,
            enricher,
        }
    }

    /// Set the scheme used for absolute request URIs.
    pub fn scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Translate `event` into a request carrying a context derived from `base`.
    pub fn translate(
        &self,
        base: &InvocationContext,
        event: &TargetGroupRequest,
    ) -> TranslateResult<Request<Body>> {
        // path
        let (path, existing_query) = parse_path(&event.path).map_err(TranslateError::PathParse)?;

        // querystring
        let query = merge_query(existing_query.as_deref(), &event.query_string_parameters);
        let path_and_query = if query.is_empty() {
            path
        } else {
            format!("{}?{}", path, query)
        };

        // body
        let body = if event.is_base64_encoded {
            decode_body(&event.body).map_err(TranslateError::BodyDecode)?
        } else {
            event.body.clone().into_bytes()
        };

        // headers, including the trace header
        let headers = copy_headers(&event.headers, body.len())?;

        // host
        let host = headers
            .get(HOST)
            .map(HeaderValue::as_bytes)
            .filter(|h| !h.is_empty());
        let uri = match host {
            Some(host) => Uri::builder()
                .scheme(self.scheme.clone())
                .authority(host)
                .path_and_query(path_and_query),
            None => Uri::builder().path_and_query(path_and_query),
        }
        .build()
        .map_err(TranslateError::RequestConstruction)?;

        let method = if event.http_method.is_empty() {
            "GET"
        } else {
            event.http_method.as_str()
        };

        let mut request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::from(body))
            .map_err(TranslateError::RequestConstruction)?;
        *request.headers_mut() = headers;

        let remote_addr = event.header("x-forwarded-for").unwrap_or_default();
        request
            .extensions_mut()
            .insert(RemoteAddr(remote_addr.to_string()));
        request
            .extensions_mut()
            .insert(self.enricher.enrich(base, event));

        tracing::trace!(
            method = %request.method(),
            uri = %request.uri(),
            remote_addr = %remote_addr,
            "Translated target group request"
        );

        Ok(request)
    }
}

/// Translate `event` with the default translator.
pub fn new_request(
    base: &InvocationContext,
    event: &TargetGroupRequest,
) -> TranslateResult<Request<Body>> {
    Translator::new().translate(base, event)
}

/// Parse `raw` as a URL reference, returning its path and raw query.
///
/// Any scheme or authority in `raw` is dropped. Dot segments are resolved.
fn parse_path(raw: &str) -> Result<(String, Option<String>), PathError> {
    if raw.bytes().any(|b| b < 0x20 || b == 0x7f) {
        return Err(PathError::ControlCharacter);
    }
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    check_escapes(&raw[..end])?;

    let base = Url::parse(PATH_BASE)?;
    let url = Url::options().base_url(Some(&base)).parse(raw)?;

    let path = if url.path().starts_with('/') {
        url.path().to_string()
    } else {
        format!("/{}", url.path())
    };
    Ok((path, url.query().map(str::to_string)))
}

/// Reject `%` not followed by two hex digits.
fn check_escapes(s: &str) -> Result<(), PathError> {
    let bytes = s.as_bytes();
    for (i, _) in s.match_indices('%') {
        let valid = bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            return Err(PathError::InvalidEscape(s[i..].chars().take(3).collect()));
        }
    }
    Ok(())
}

/// Decode a base64 body, skipping line breaks.
fn decode_body(body: &str) -> Result<Vec<u8>, base64::DecodeError> {
    if body.contains(['\r', '\n']) {
        let stripped: Vec<u8> = body
            .bytes()
            .filter(|b| !matches!(b, b'\r' | b'\n'))
            .collect();
        BODY_ENGINE.decode(stripped)
    } else {
        BODY_ENGINE.decode(body.as_bytes())
    }
}

/// Merge `overrides` into the query string `existing`.
///
/// Each override replaces every value of its key. Output keys are sorted.
fn merge_query(existing: Option<&str>, overrides: &BTreeMap<String, String>) -> String {
    let mut values: BTreeMap<String, Vec<String>> = BTreeMap::new();
    if let Some(query) = existing {
        for (k, v) in form_urlencoded::parse(query.as_bytes()) {
            values.entry(k.into_owned()).or_default().push(v.into_owned());
        }
    }
    for (k, v) in overrides {
        values.insert(k.clone(), vec![v.clone()]);
    }

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (k, vs) in &values {
        for v in vs {
            serializer.append_pair(k, v);
        }
    }
    serializer.finish()
}

/// Copy event headers verbatim and add Content-Length if it is missing.
fn copy_headers(
    source: &BTreeMap<String, String>,
    body_len: usize,
) -> TranslateResult<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(source.len() + 1);
    for (k, v) in source {
        let name = HeaderName::from_bytes(k.as_bytes())
            .map_err(|e| TranslateError::RequestConstruction(e.into()))?;
        let value = HeaderValue::from_bytes(v.as_bytes())
            .map_err(|e| TranslateError::RequestConstruction(e.into()))?;
        // Names differing only in case collapse; the later one in map order wins.
        headers.insert(name, value);
    }

    if !headers.contains_key(CONTENT_LENGTH) && body_len > 0 {
        headers.insert(CONTENT_LENGTH, HeaderValue::from(body_len));
    }

    Ok(headers)
}
