//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::{AgentApi, DigipinApi, GeocodingApi, HealthApi};
use crate::error::{ApiError, ApiResult};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Sent with every request; Nominatim refuses anonymous clients
const CLIENT_USER_AGENT: &str = concat!("digipin-api-client/", env!("CARGO_PKG_VERSION"));

/// DIGIPIN API client with retry
///
/// This client wraps `reqwest` and adds:
/// - Automatic retry with exponential backoff
/// - Request correlation IDs for tracing
/// - `detail` extraction from error bodies
#[derive(Clone)]
pub struct DigipinClient {
    inner: Client,
    config: Arc<ClientConfig>,
}

impl DigipinClient {
    /// Create a new client with default configuration from environment
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the backend URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access DIGIPIN conversion endpoints
    #[must_use]
    pub fn digipin(&self) -> DigipinApi {
        DigipinApi::new(self.clone())
    }

    /// Access the AI assistant
    #[must_use]
    pub fn agent(&self) -> AgentApi {
        AgentApi::new(self.clone())
    }

    /// Access health check endpoints
    #[must_use]
    pub fn health(&self) -> HealthApi {
        HealthApi::new(self.clone())
    }

    /// Access the geocoder
    #[must_use]
    pub fn geocoding(&self) -> GeocodingApi {
        GeocodingApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Low-level HTTP methods with retry
    // -------------------------------------------------------------------------

    /// Perform a GET request against the backend
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        self.execute_with_retry(|| self.inner.get(&url)).await
    }

    /// Perform a POST request against the backend
    #[instrument(skip(self, body))]
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<T> {
        let url = self.url(path);
        self.execute_with_retry(|| {
            self.inner
                .post(&url)
                .header(CONTENT_TYPE, "application/json")
                .json(body)
        })
        .await
    }

    /// Perform a GET request to an absolute URL with query parameters
    #[instrument(skip(self, query))]
    pub async fn get_url<T: DeserializeOwned, Q: Serialize + ?Sized>(&self, url: &str, query: &Q) -> ApiResult<T> {
        self.execute_with_retry(|| self.inner.get(url).query(query)).await
    }

    /// Get duration timing for a request
    pub async fn timed_get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<(T, Duration)> {
        let start = Instant::now();
        let result = self.get(path).await?;
        Ok((result, start.elapsed()))
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Execute request with retry logic. `build` is called once per attempt.
    async fn execute_with_retry<T: DeserializeOwned>(&self, build: impl Fn() -> RequestBuilder) -> ApiResult<T> {
        let retry_config = &self.config.retry;
        let request_id = Uuid::new_v4().to_string();
        let mut last_error: Option<ApiError> = None;

        for attempt in 0..retry_config.max_attempts {
            // Wait before retry (except first attempt)
            if attempt > 0 {
                let delay = retry_config.delay_for_attempt(attempt);
                debug!(
                    request_id = %request_id,
                    attempt = attempt,
                    delay_ms = delay.as_millis(),
                    "Retrying after delay"
                );
                tokio::time::sleep(delay).await;
            }

            let start = Instant::now();
            let result = match build().header(X_REQUEST_ID, &request_id).send().await {
                Ok(response) => handle_response(response).await,
                Err(e) if e.is_timeout() => Err(ApiError::Timeout(self.config.timeout)),
                Err(e) => Err(ApiError::Request(e)),
            };
            let elapsed = start.elapsed();

            match result {
                Ok(value) => {
                    debug!(
                        request_id = %request_id,
                        attempt = attempt + 1,
                        elapsed_ms = elapsed.as_millis(),
                        "Request succeeded"
                    );
                    return Ok(value);
                }
                Err(e) if e.is_retryable() && retry_config.should_retry(attempt + 1) => {
                    debug!(
                        request_id = %request_id,
                        attempt = attempt + 1,
                        error = %e,
                        "Request failed, will retry"
                    );
                    last_error = Some(e);
                }
                Err(e) => {
                    debug!(
                        request_id = %request_id,
                        attempt = attempt + 1,
                        error = %e,
                        "Request failed, not retrying"
                    );
                    return Err(e);
                }
            }
        }

        Err(ApiError::RetriesExhausted {
            attempts: retry_config.max_attempts,
            last_error: last_error.map_or_else(|| "Unknown error".to_string(), |e| e.to_string()),
        })
    }
}

/// Handle HTTP response and deserialize
async fn handle_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    let text = response.text().await?;

    if status.is_success() {
        // An empty body reads as `{}`
        let body = if text.trim().is_empty() { "{}" } else { text.as_str() };
        return serde_json::from_str(body).map_err(ApiError::Json);
    }

    let message = error_detail(&text)
        .or_else(|| status.canonical_reason().map(String::from))
        .unwrap_or_else(|| "Request failed".to_string());
    Err(ApiError::api_response(status.as_u16(), message))
}

/// `detail` from an error body. Validation errors carry a list there, which is
/// returned as JSON text.
fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(detail) => Some(detail.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}
