//! Core utilities for the DIGIPIN tools
//!
//! This crate provides shared functionality used by the library crates and the
//! `digipin` binary:
//!
//! - **Error handling**: Structured errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with validation
//! - **Retry policies**: Backoff schedules for remote calls
//!
//! # Example
//!
//! ```rust,no_run
//! use digipin_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("favorites live in {}", config.favorites_path().display());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod retry;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::retry::RetryConfig;
}
