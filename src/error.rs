//! Error types for the `dhan-guard` crate.
//!
//! All fallible operations in this crate return [`Result<T>`], which is an
//! alias for `std::result::Result<T, DhanError>`.
//!
//! [`DhanError`] covers:
//! - **Validation errors**: A request body failed a structural rule
//! - **Order ID mismatch**: Body `orderId` disagrees with the route path
//! - **Guard blocks**: The kill switch refused a trading action
//! - **API errors**: Structured error responses from DhanHQ (codes DH-901 to DH-910)
//! - **HTTP status errors**: Unexpected status codes with response body
//! - **HTTP transport errors**: Network, TLS, timeout failures
//! - **JSON errors**: Deserialization failures
//! - **Settings / config errors**: Rejected risk settings, missing env vars

use std::fmt;

/// Error response returned by the DhanHQ API.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    /// Category of the error (e.g. "Invalid Authentication").
    #[serde(default)]
    pub error_type: Option<String>,
    /// Dhan error code (e.g. "DH-901").
    #[serde(default)]
    pub error_code: Option<String>,
    /// Human-readable description of the error.
    #[serde(default)]
    pub error_message: Option<String>,
}

impl fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.error_code.as_deref().unwrap_or("UNKNOWN"),
            self.error_type.as_deref().unwrap_or("Unknown Error"),
            self.error_message.as_deref().unwrap_or("No message"),
        )
    }
}

/// A request body broke one of the order validation rules.
///
/// Validation is fail-fast: exactly one error is produced, for the first rule
/// that fails. The message always names the offending field and is meant to be
/// shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct OrderValidationError {
    field: &'static str,
    message: String,
}

impl OrderValidationError {
    pub(crate) fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// Wire name of the field that failed (e.g. `"triggerPrice"`).
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// All possible errors produced by this crate.
#[derive(Debug, thiserror::Error)]
pub enum DhanError {
    /// An order request failed client-side validation.
    #[error("Validation error: {0}")]
    Validation(#[from] OrderValidationError),

    /// The `orderId` in the body differs from the one in the route path.
    #[error("Order ID mismatch: path={path}, body={body}")]
    OrderIdMismatch {
        /// Order id bound to the route.
        path: String,
        /// Order id submitted in the body.
        body: String,
    },

    /// The kill switch is active, so the trade was never sent.
    #[error("Trade blocked by kill switch: {reason}")]
    GuardBlocked {
        /// Activation reason recorded by the kill switch.
        reason: String,
    },

    /// Risk settings were rejected (e.g. a non-positive daily loss limit).
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// An error response returned by the DhanHQ REST API.
    #[error("API error: {body}")]
    Api {
        /// The HTTP status code the broker answered with.
        status: reqwest::StatusCode,
        /// The parsed error body.
        body: ApiErrorBody,
    },

    /// The server returned an unexpected HTTP status code.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code.
        status: reqwest::StatusCode,
        /// The response body text.
        body: String,
    },

    /// A network or transport-level error from `reqwest`.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to serialize or deserialize JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An error building or parsing a URL.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Reading or writing the settings file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The caller provided an invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl DhanError {
    /// True for failures produced locally, before any request was sent.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::OrderIdMismatch { .. }
                | Self::GuardBlocked { .. }
                | Self::InvalidSettings(_)
                | Self::InvalidArgument(_)
        )
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DhanError>;
