//! HTTP clients for DIGIPIN services
//!
//! This crate talks to the DIGIPIN assistant backend (deterministic geo
//! endpoints plus the AI assistant) and to a Nominatim geocoder.
//!
//! # Features
//!
//! - **Environment-based configuration**: Load URLs and timeouts from environment variables
//! - **Retry with exponential backoff**: Automatic retry for transient failures
//! - **Request correlation**: Track requests with unique IDs for debugging
//! - **Debouncing**: Collapse bursts of search-as-you-type calls into one
//!
//! # Example
//!
//! ```rust,no_run
//! use digipin_api_client::DigipinClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DigipinClient::new()?;
//!
//!     let health = client.health().check().await?;
//!     println!("Backend: {} (assistant ready: {})", health.status, health.agent_ready);
//!
//!     let encoded = client.digipin().encode(28.6139, 77.2090).await?;
//!     println!("DIGIPIN: {}", encoded.pin);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod debounce;
pub mod endpoints;
pub mod error;

pub use client::DigipinClient;
pub use config::{ClientConfig, Environment};
pub use debounce::Debouncer;
pub use error::{ApiError, ApiResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::DigipinClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::debounce::Debouncer;
    pub use crate::endpoints::{AgentApi, DigipinApi, GeocodingApi, HealthApi};
    pub use crate::error::{ApiError, ApiResult};
}
