//! Campaigns API error types.

/// Errors that can occur while talking to the campaigns API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// API returned a non-success response
    #[error("API error (status {status}): {message}")]
    Status { status: u16, message: String },

    /// Failed to deserialize API response
    #[error("Failed to deserialize API response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Base URL and path do not form a valid endpoint
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl ApiError {
    /// Message reported by the server, if the failure carried one.
    ///
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    /// Short reason for the failure: the HTTP reason phrase for status
    /// errors, the full description otherwise.
    ///
    pub fn reason(&self) -> String {
        match self {
            ApiError::Status { status, .. } => reqwest::StatusCode::from_u16(*status)
                .ok()
                .and_then(|code| code.canonical_reason())
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string()),
            other => other.to_string(),
        }
    }
}
