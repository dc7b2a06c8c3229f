//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::LookupResult;

/// Successful lookup response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct LookupResponse {
    pub data: LookupResult,
}

/// Structured error response body.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Status name (e.g. "BAD_REQUEST")
    pub status: String,

    /// HTTP status code
    pub code: u16,

    /// Machine-readable error code (e.g. "INVALID_BIN")
    pub error: String,

    /// Human-readable message
    pub message: String,
}

/// Query string of the HTML lookup page.
#[derive(Debug, Deserialize)]
pub struct LookupPageRequest {
    /// BIN as typed by the user
    pub bin: Option<String>,
}
