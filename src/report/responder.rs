//! Maps reports and pipeline failures onto wire responses
//!
//! Success and failure share one transport-agnostic shape: an HTTP-style
//! status code plus a JSON body. Only fetch and unexpected errors surface as
//! failures; metadata problems never reach this layer.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::error;

use crate::error::Error;
use crate::report::ForensicReport;

/// A serialized response ready for the transport layer
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceResponse {
    pub status: u16,
    pub body: Value,
}

/// Failure body: `{ error, details? }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ServiceResponse {
    pub fn ok(report: &ForensicReport) -> Self {
        match serde_json::to_value(report) {
            Ok(body) => Self { status: 200, body },
            Err(err) => Self::failure(500, "Failed to serialize report", Some(err.to_string())),
        }
    }

    /// No-op success for preflight requests
    pub fn preflight() -> Self {
        Self {
            status: 200,
            body: json!({}),
        }
    }

    pub fn method_not_allowed() -> Self {
        Self::failure(405, "Method not allowed", None)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::failure(400, message, None)
    }

    pub fn from_error(err: &Error) -> Self {
        match err {
            Error::Input(message) => Self::failure(400, message, None),
            Error::Fetch(cause) => {
                Self::failure(500, "Failed to fetch media file", Some(cause.to_string()))
            }
            other => {
                error!(error = %other, "request failed unexpectedly");
                Self::failure(500, "Analysis failed", Some(other.to_string()))
            }
        }
    }

    fn failure(status: u16, message: &str, details: Option<String>) -> Self {
        let body = FailureBody {
            error: message.to_string(),
            details,
        };
        Self {
            status,
            body: serde_json::to_value(body).unwrap_or_else(|_| json!({ "error": message })),
        }
    }
}
