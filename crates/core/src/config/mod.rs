//! Configuration loading and schema definitions
//!
//! Shared configuration types used by the CLI and the library crates.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
