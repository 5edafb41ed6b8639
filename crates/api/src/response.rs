//! Shared response body types for API handlers.
//!
//! Successful item responses are the bare entity JSON; only errors use a
//! fixed envelope.

use serde::Serialize;

/// Error body: `{ "error": ..., "details": [...] }`.
///
/// `details` is omitted unless the failure carries a list of reasons.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: Vec<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details),
        }
    }
}
