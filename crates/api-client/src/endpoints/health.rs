//! Health check endpoint

use crate::client::DigipinClient;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Health check API interface
#[derive(Clone)]
pub struct HealthApi {
    client: DigipinClient,
}

impl HealthApi {
    /// Create a new health API interface
    pub(crate) fn new(client: DigipinClient) -> Self {
        Self { client }
    }

    /// Check backend health
    pub async fn check(&self) -> ApiResult<HealthResponse> {
        self.client.get("health").await
    }

    /// Check health with timing information
    pub async fn check_timed(&self) -> ApiResult<(HealthResponse, Duration)> {
        self.client.timed_get("health").await
    }
}

/// Health check response from the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Health status, `"ok"` when up
    pub status: String,
    /// Whether the AI assistant is configured
    #[serde(default)]
    pub agent_ready: bool,
}

impl HealthResponse {
    /// True when the backend reports `ok`
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_deserialize() {
        let response: HealthResponse = serde_json::from_str(r#"{"status": "ok", "agent_ready": false}"#).unwrap();
        assert!(response.is_ok());
        assert!(!response.agent_ready);

        let response: HealthResponse = serde_json::from_str(r#"{"status": "degraded"}"#).unwrap();
        assert!(!response.is_ok());
    }
}
