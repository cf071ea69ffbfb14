//! Terminal helpers for the `digipin` binary
//!
//! Provides shared CLI functionality:
//! - Output format selection (text or JSON)
//! - Status messages and key/value result lines
//! - Progress indicators for batch work

#![warn(missing_docs)]

pub mod output;
pub mod progress;

pub use output::{OutputFormat, Status};
