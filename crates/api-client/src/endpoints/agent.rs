//! AI assistant endpoint

use crate::client::DigipinClient;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};

/// Assistant API interface
#[derive(Clone)]
pub struct AgentApi {
    client: DigipinClient,
}

impl AgentApi {
    /// Create a new assistant API interface
    pub(crate) fn new(client: DigipinClient) -> Self {
        Self { client }
    }

    /// Ask the assistant. `context` is passed through as-is, e.g. the
    /// currently selected location.
    ///
    /// Fails with status 503 when the backend has no assistant configured.
    pub async fn respond(&self, message: &str, context: Option<serde_json::Value>) -> ApiResult<AgentResponse> {
        let body = AgentPrompt { message, context };
        self.client.post("api/agent/respond", &body).await
    }
}

#[derive(Debug, Serialize)]
struct AgentPrompt<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<serde_json::Value>,
}

/// Assistant reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    /// The prompt as received
    pub message: String,
    /// Reply text
    pub response: String,
}
