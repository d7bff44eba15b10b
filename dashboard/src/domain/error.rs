//! Uniform failure reported by calls to the remote API.
//!
//! Transport failures (no response) and server failures (a response with an
//! error status) share one type so the presentation layer can render either
//! with the same message extraction. Validation failures never reach this
//! type; they are rejected by the input constructors before any request.

use std::fmt;

use serde_json::Value;

/// Message shown when neither the server nor the transport described the
/// failure.
pub const UNKNOWN_ERROR_MESSAGE: &str = "unknown error";

/// Stable machine-readable category for an [`ApiFailure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// No response was obtained.
    Transport,
    /// The server answered with an error status.
    Server,
    /// The server answered 404 for the requested resource.
    NotFound,
    /// A success response carried a body that could not be decoded.
    Decode,
    /// The failure could not be classified.
    Unknown,
}

/// Failure of a remote call.
///
/// ## Message extraction
/// [`ApiFailure::message`] returns, in priority order:
/// 1. the structured `error` string from the server's JSON body;
/// 2. the transport-level message;
/// 3. [`UNKNOWN_ERROR_MESSAGE`].
///
/// # Examples
/// ```
/// use dashboard::domain::{ApiFailure, ErrorCode};
/// use serde_json::json;
///
/// let failure = ApiFailure::server(400, Some(json!({ "error": "Missing password" })));
/// assert_eq!(failure.code(), ErrorCode::Server);
/// assert_eq!(failure.message(), "Missing password");
///
/// let failure = ApiFailure::server(500, None);
/// assert_eq!(failure.message(), "request failed with status code 500");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ApiFailure {
    code: ErrorCode,
    status: Option<u16>,
    server_message: Option<String>,
    transport_message: Option<String>,
    body: Option<Value>,
}

impl ApiFailure {
    /// A request that never produced a response.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Transport,
            status: None,
            server_message: None,
            transport_message: non_blank(message.into()),
            body: None,
        }
    }

    /// A response carrying an error status and an optional JSON body.
    #[must_use]
    pub fn server(status: u16, body: Option<Value>) -> Self {
        let code = if status == 404 {
            ErrorCode::NotFound
        } else {
            ErrorCode::Server
        };
        let server_message = body
            .as_ref()
            .and_then(|value| value.get("error"))
            .and_then(Value::as_str)
            .map(str::to_owned)
            .and_then(non_blank);
        Self {
            code,
            status: Some(status),
            server_message,
            transport_message: Some(format!("request failed with status code {status}")),
            body,
        }
    }

    /// A success response whose body did not have the expected shape.
    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Decode,
            status: None,
            server_message: None,
            transport_message: non_blank(message.into()),
            body: None,
        }
    }

    /// A failure with nothing to say about itself.
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            code: ErrorCode::Unknown,
            status: None,
            server_message: None,
            transport_message: None,
            body: None,
        }
    }

    /// Failure category.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// HTTP status when a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// Raw response body, if one was decoded.
    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Whether the server reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.code == ErrorCode::NotFound
    }

    /// Human-readable message using the documented fallback order.
    #[must_use]
    pub fn message(&self) -> &str {
        self.server_message
            .as_deref()
            .or(self.transport_message.as_deref())
            .unwrap_or(UNKNOWN_ERROR_MESSAGE)
    }
}

fn non_blank(message: String) -> Option<String> {
    if message.trim().is_empty() {
        None
    } else {
        Some(message)
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ApiFailure {}
