//! Error types for the API client

use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// API returned an error response
    #[error("API error ({status}): {message}")]
    ApiResponse {
        /// HTTP status code
        status: u16,
        /// `detail` from the error body, or the status text
        message: String,
    },

    /// Request timeout
    #[error("Request timeout after {0:?}")]
    Timeout(std::time::Duration),

    /// All retry attempts exhausted
    #[error("All {attempts} retry attempts failed: {last_error}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Last error message
        last_error: String,
    },

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an API response error
    pub fn api_response(status: u16, message: impl Into<String>) -> Self {
        Self::ApiResponse {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is retryable
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(e) => {
                // Retry on connection errors, timeouts
                e.is_connect() || e.is_timeout()
            }
            Self::ApiResponse { status, .. } => {
                // Retry on 5xx errors and 429 (rate limited)
                *status >= 500 || *status == 429
            }
            Self::Timeout(_) => true,
            Self::Config(_) | Self::Json(_) | Self::InvalidUrl(_) | Self::RetriesExhausted { .. } => false,
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if *status >= 500)
    }
}

impl From<ApiError> for digipin_core::Error {
    fn from(err: ApiError) -> Self {
        use digipin_core::ErrorCode;

        let code = match &err {
            ApiError::Config(_) | ApiError::InvalidUrl(_) => ErrorCode::ConfigError,
            ApiError::ApiResponse { .. } if err.is_client_error() => ErrorCode::RemoteRejected,
            ApiError::Request(_) | ApiError::Timeout(_) | ApiError::RetriesExhausted { .. } => {
                ErrorCode::RemoteUnavailable
            }
            _ => ErrorCode::RemoteError,
        };

        let message = err.to_string();
        let error = digipin_core::Error::new(code, message);
        let error = match code {
            ErrorCode::RemoteUnavailable => error.with_suggestion(
                "Check that the backend is running, or set DIGIPIN_AGENT_API to its URL",
            ),
            _ => error,
        };
        error.with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use digipin_core::ErrorCode;

    #[test]
    fn test_retryable_statuses() {
        assert!(ApiError::api_response(503, "down").is_retryable());
        assert!(ApiError::api_response(429, "slow down").is_retryable());
        assert!(!ApiError::api_response(400, "bad pin").is_retryable());
        assert!(!ApiError::config("x").is_retryable());
    }

    #[test]
    fn test_status_classes() {
        assert!(ApiError::api_response(422, "x").is_client_error());
        assert!(ApiError::api_response(500, "x").is_server_error());
        assert!(!ApiError::api_response(500, "x").is_client_error());
    }

    #[test]
    fn test_conversion_to_core_error() {
        let core: digipin_core::Error = ApiError::api_response(400, "Invalid DIGIPIN").into();
        assert_eq!(core.code, ErrorCode::RemoteRejected);
        assert!(core.message.contains("Invalid DIGIPIN"));

        let core: digipin_core::Error = ApiError::RetriesExhausted {
            attempts: 3,
            last_error: "refused".into(),
        }
        .into();
        assert_eq!(core.code, ErrorCode::RemoteUnavailable);
        assert!(core.suggestion.is_some());
    }
}
