//! HTTP request translation subsystem.
//!
//! # Data Flow
//! ```text
//! TargetGroupRequest
//!     → request.rs (path, query, body, headers, host, context)
//!     → http::Request<Body> with RemoteAddr + InvocationContext extensions
//!     → downstream tower::Service (out of scope)
//! ```

pub mod error;
pub mod request;

pub use error::{PathError, TranslateError, TranslateResult};
pub use request::{new_request, RemoteAddr, RequestExt, Translator};
