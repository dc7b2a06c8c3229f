//! HandyAPI client error types.

/// Errors from the HandyAPI HTTP client.
///
/// These never reach API callers: the lookup policy treats every error the
/// same as "no data".
#[derive(Debug, thiserror::Error)]
pub enum HandyError {
    /// HTTP request failed (network error, connection refused, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Client could not be configured
    #[error("not configured: {0}")]
    NotConfigured(String),
}
