//! The JSON envelope every proxy route answers with.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::DhanError;

/// `{ success, data?, error?, message?, status }`
///
/// On failure, `error` is a short category and `message` carries the detail.
/// For broker rejections `error` is the broker's own message, so operators
/// see the literal rejection reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub status: u16,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
            status: StatusCode::OK.as_u16(),
        }
    }

    fn failure(status: StatusCode, error: impl Into<String>, message: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message,
            status: status.as_u16(),
        }
    }

    /// Map a crate error onto the envelope.
    pub fn from_error(err: &DhanError) -> Self {
        match err {
            DhanError::Validation(e) => Self::failure(
                StatusCode::BAD_REQUEST,
                "Validation error",
                Some(e.message().to_owned()),
            ),
            DhanError::OrderIdMismatch { .. } => {
                Self::failure(StatusCode::BAD_REQUEST, "Order ID mismatch", None)
            }
            DhanError::GuardBlocked { reason } => Self::failure(
                StatusCode::FORBIDDEN,
                "Trade blocked by kill switch",
                Some(reason.clone()),
            ),
            DhanError::InvalidSettings(msg) | DhanError::InvalidArgument(msg) => {
                Self::failure(StatusCode::BAD_REQUEST, msg.clone(), None)
            }
            DhanError::Api { status, body } => Self::failure(
                *status,
                body.error_message
                    .clone()
                    .unwrap_or_else(|| body.to_string()),
                body.error_code.clone(),
            ),
            DhanError::HttpStatus { status, body } => {
                Self::failure(*status, format!("Broker returned HTTP {status}"), Some(body.clone()))
            }
            DhanError::Http(_) | DhanError::Json(_) => Self::failure(
                StatusCode::BAD_GATEWAY,
                "Failed to reach broker",
                Some(err.to_string()),
            ),
            DhanError::Url(_) | DhanError::Io(_) | DhanError::Config(_) => Self::failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error",
                Some(err.to_string()),
            ),
        }
    }

    pub fn from_result(result: Result<T, DhanError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => Self::from_error(&err),
        }
    }
}
