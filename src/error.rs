//! Error types for the FIB API client.
//!
//! The gateway reports failures in two shapes: the identity endpoint returns
//! a [`LoginError`], the payment endpoints return an [`ErrorBody`]. Both are
//! surfaced through the single [`Error`] enum together with transport and
//! decoding failures.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A specialized `Result` type for FIB operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all FIB API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The identity endpoint rejected the client credentials
    #[error("Authentication failed: {0}")]
    Login(LoginError),

    /// A payment endpoint returned a structured error
    #[error("API error: status={status}, code={code:?}", code = .body.code())]
    Api {
        /// HTTP status code
        status: u16,
        /// Error body reported by the gateway
        body: ErrorBody,
    },

    /// The gateway answered with a status this client does not handle
    #[error("Unexpected response status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The gateway answered successfully but the payload is unusable
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` if this is an authentication-related error.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Error::Login(_) => true,
            Error::Api { status, .. } => *status == 401,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a client-side issue
    /// (invalid input, bad request, etc.).
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Api { status, .. } | Error::UnexpectedStatus { status, .. } => {
                (400..500).contains(status)
            }
            Error::Login(_) | Error::InvalidInput(_) | Error::Config(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Api { status, .. } | Error::UnexpectedStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// The gateway error body, if the gateway returned one.
    pub fn error_body(&self) -> Option<&ErrorBody> {
        match self {
            Error::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    /// The code of the first gateway error entry, e.g. `PAYMENT_NOT_FOUND`.
    pub fn error_code(&self) -> Option<&str> {
        self.error_body().and_then(ErrorBody::code)
    }
}

/// Error returned by the identity endpoint during the token exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginError {
    /// Short error identifier, e.g. `unauthorized_client`
    #[serde(rename = "error")]
    pub title: String,
    /// Human-readable explanation
    #[serde(rename = "error_description", default)]
    pub description: String,
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

/// Structured error body returned by the payment endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Gateway trace identifier for support requests
    #[serde(default)]
    pub trace_id: String,
    /// Reported errors, in gateway order
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

/// A single entry of an [`ErrorBody`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable code, e.g. `INVALID_REQUEST`
    pub code: String,
    /// Short title
    #[serde(default)]
    pub title: String,
    /// Longer explanation
    #[serde(default)]
    pub detail: String,
}

impl ErrorBody {
    /// Code reported when the gateway answers 401.
    pub const UNAUTHORIZED_CODE: &'static str = "UNAUTHORIZED";

    /// Body used for 401 responses, whose payload is not parsed.
    pub(crate) fn unauthorized() -> Self {
        Self {
            trace_id: String::new(),
            errors: vec![ErrorDetail {
                code: Self::UNAUTHORIZED_CODE.to_string(),
                title: "Unauthorized".to_string(),
                detail: "Access token is missing, invalid or expired".to_string(),
            }],
        }
    }

    /// Code of the first error entry.
    pub fn code(&self) -> Option<&str> {
        self.errors.first().map(|e| e.code.as_str())
    }

    /// Returns `true` if any entry carries the given code.
    pub fn has_code(&self, code: &str) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }
}
