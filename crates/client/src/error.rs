//! Normalization of backend error responses
//!
//! The backend reports failures as `{"detail": ...}` where `detail` is a
//! validation list, a single string, or something else entirely. This
//! module is the only place that inspects those shapes; everything above it
//! sees one human-readable message.

use learnloop_common::ConfigError;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Backend answered with a non-success status
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// Request never reached the backend
    #[error("Request failed: {0}")]
    Transport(String),

    /// Backend answered but the body could not be understood
    #[error("Request failed: unreadable response ({0})")]
    Parse(String),

    /// Request body could not be encoded
    #[error("Request failed: could not encode request ({0})")]
    Encode(String),

    #[error("Client configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// No backend route is configured for this role
    #[error("No {endpoint} endpoint configured for role {role}")]
    MissingRoute { endpoint: &'static str, role: String },

    /// Login succeeded for an account the client has no dashboard for
    #[error("Unsupported account role: {0}")]
    UnsupportedRole(String),
}

impl ApiError {
    /// Build the error for a non-success response from its raw body
    pub fn rejected(status: u16, body: &[u8]) -> Self {
        let message = ErrorDetail::from_body(body)
            .message()
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        ApiError::Rejected { status, message }
    }

    /// HTTP status the backend answered with, if it answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// One entry of a validation-error list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub loc: Vec<serde_json::Value>,
    pub msg: String,
}

impl FieldError {
    /// Field path without the request-part prefix (`body`, `query`, ...)
    pub fn field(&self) -> String {
        let mut parts: Vec<String> = self
            .loc
            .iter()
            .filter_map(|segment| match segment {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect();

        if matches!(
            parts.first().map(String::as_str),
            Some("body" | "query" | "path" | "header" | "form")
        ) {
            parts.remove(0);
        }
        parts.join(".")
    }
}

/// The shapes `detail` takes in an error body
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    ValidationList(Vec<FieldError>),
    Single(String),
    Unknown(serde_json::Value),
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    detail: Option<ErrorDetail>,
}

impl ErrorDetail {
    /// Parse a raw error body; anything unparsable is `Unknown`
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorEnvelope>(body) {
            Ok(ErrorEnvelope {
                detail: Some(detail),
            }) => detail,
            _ => ErrorDetail::Unknown(serde_json::Value::Null),
        }
    }

    /// Human-readable message, or `None` when the detail carries nothing usable
    pub fn message(&self) -> Option<String> {
        match self {
            ErrorDetail::ValidationList(errors) if !errors.is_empty() => Some(
                errors
                    .iter()
                    .map(|e| {
                        let field = e.field();
                        if field.is_empty() {
                            e.msg.clone()
                        } else {
                            format!("{}: {}", field, e.msg)
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            ErrorDetail::Single(detail) if !detail.trim().is_empty() => Some(detail.clone()),
            _ => None,
        }
    }
}
