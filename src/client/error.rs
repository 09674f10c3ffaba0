//! API client errors and user-facing message mapping.

use thiserror::Error;

/// Failures surfaced by the API client.
///
/// Each request is a single best-effort attempt: there are no retries, so
/// every variant reaches the caller as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request never produced a response.
    #[error("network error: {message}")]
    Transport { message: String },

    /// The fixed per-call timeout elapsed.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {}", .detail.as_deref().unwrap_or("no detail provided"))]
    HttpStatus {
        status: u16,
        /// Server-supplied detail message, when the error body was parseable.
        detail: Option<String>,
    },

    /// The input failed local validation; no request was sent.
    #[error("{message}")]
    InvalidRequest { message: String },

    /// The response body did not match the expected shape.
    #[error("failed to decode response: {message}")]
    Decode { message: String },
}

impl ClientError {
    /// Map a failure to one human-readable string.
    ///
    /// Precedence: server-supplied detail, then status-specific text, then
    /// timeout, then network, then a generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::HttpStatus {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ClientError::HttpStatus { status: 404, .. } => {
                "Sample not found. Please select a different signal.".to_string()
            }
            ClientError::HttpStatus { status, .. } if *status >= 500 => {
                "Server error. Please try again later.".to_string()
            }
            ClientError::Timeout { .. } => "Request timed out. Please try again.".to_string(),
            ClientError::Transport { .. } => {
                "Network error. Please check that the analysis service is reachable."
                    .to_string()
            }
            ClientError::InvalidRequest { message } => message.clone(),
            _ => "Analysis failed. Please try again.".to_string(),
        }
    }
}
