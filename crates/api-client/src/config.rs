//! Configuration for the DIGIPIN API clients
//!
//! Supports environment-based configuration with sensible defaults.

use crate::error::{ApiError, ApiResult};
use digipin_core::retry::RetryConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default assistant backend URL
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Default geocoder URL
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

/// Environment types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Backend on the same machine
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

impl Environment {
    /// Parse from environment variable
    pub fn from_env() -> Self {
        Self::parse(&env::var("DIGIPIN_ENV").unwrap_or_default())
    }

    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "staging" | "stage" => Self::Staging,
            _ => Self::Development,
        }
    }

    /// Retry policy suited to this environment
    #[must_use]
    pub fn retry(self) -> RetryConfig {
        match self {
            Self::Development => RetryConfig::quick(),
            Self::Staging => RetryConfig::default(),
            Self::Production => RetryConfig::patient(),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the assistant backend
    pub base_url: String,
    /// Base URL of the Nominatim geocoder
    pub geocoder_url: String,
    /// Request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Retry configuration
    pub retry: RetryConfig,
    /// Current environment
    pub environment: Environment,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            timeout: Duration::from_secs(30),
            retry: RetryConfig::quick(),
            environment: Environment::default(),
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `DIGIPIN_AGENT_API` or `DIGIPIN_API_URL`: Assistant backend URL
    /// - `DIGIPIN_GEOCODER_URL`: Nominatim base URL
    /// - `DIGIPIN_ENV`: Environment (development/staging/production)
    /// - `DIGIPIN_TIMEOUT_SECS`: Request timeout in seconds
    pub fn from_env() -> ApiResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`], reading variables through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ApiResult<Self> {
        let environment = Environment::parse(&lookup("DIGIPIN_ENV").unwrap_or_default());

        // DIGIPIN_AGENT_API first, then DIGIPIN_API_URL, then default
        let base_url = lookup("DIGIPIN_AGENT_API")
            .or_else(|| lookup("DIGIPIN_API_URL"))
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let geocoder_url = lookup("DIGIPIN_GEOCODER_URL")
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_GEOCODER_URL.to_string());

        let timeout = match lookup("DIGIPIN_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| ApiError::config(format!("DIGIPIN_TIMEOUT_SECS is not a number: {raw}")))?,
            None => Duration::from_secs(30),
        };

        let config = Self {
            base_url,
            geocoder_url,
            timeout,
            retry: environment.retry(),
            environment,
        };
        config.validate()?;
        Ok(config)
    }

    /// Builder-style method to set the backend URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set the geocoder URL
    #[must_use]
    pub fn with_geocoder_url(mut self, url: impl Into<String>) -> Self {
        self.geocoder_url = url.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set retry config
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        for (name, url) in [("base_url", &self.base_url), ("geocoder_url", &self.geocoder_url)] {
            if url.is_empty() {
                return Err(ApiError::config(format!("{name} cannot be empty")));
            }
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ApiError::InvalidUrl(format!("{name} must start with http:// or https://: {url}")));
            }
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert!(config.geocoder_url.contains("nominatim"));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_from_empty_environment() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.retry, RetryConfig::quick());
    }

    #[test]
    fn test_agent_api_wins_over_api_url() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("DIGIPIN_AGENT_API", "https://agent.example"),
            ("DIGIPIN_API_URL", "https://api.example"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://agent.example");

        let config = ClientConfig::from_lookup(lookup(&[("DIGIPIN_API_URL", "https://api.example")])).unwrap();
        assert_eq!(config.base_url, "https://api.example");
    }

    #[test]
    fn test_environment_selects_retry() {
        let config = ClientConfig::from_lookup(lookup(&[("DIGIPIN_ENV", "prod"), ("DIGIPIN_TIMEOUT_SECS", "5")])).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.retry, RetryConfig::patient());
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_bad_timeout_is_rejected() {
        assert!(ClientConfig::from_lookup(lookup(&[("DIGIPIN_TIMEOUT_SECS", "soon")])).is_err());
        assert!(ClientConfig::from_lookup(lookup(&[("DIGIPIN_TIMEOUT_SECS", "0")])).is_err());
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::default()
            .with_base_url("https://digipin.example")
            .with_timeout(Duration::from_secs(60));

        assert_eq!(config.base_url, "https://digipin.example");
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_validation() {
        assert!(ClientConfig::default().validate().is_ok());
        assert!(ClientConfig::default().with_base_url("").validate().is_err());
        assert!(matches!(
            ClientConfig::default().with_geocoder_url("ftp://x").validate(),
            Err(ApiError::InvalidUrl(_))
        ));
    }
}
