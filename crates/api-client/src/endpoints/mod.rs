//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for a specific set of endpoints.
//!
//! | Module | Service | Description |
//! |--------|---------|-------------|
//! | `digipin` | backend `/api/digipin/*` | Encode, decode, distance, nearest |
//! | `agent` | backend `/api/agent/respond` | AI assistant |
//! | `health` | backend `/health` | Liveness and assistant readiness |
//! | `geocoding` | Nominatim `/reverse`, `/search` | Place names and search |

pub mod agent;
pub mod digipin;
pub mod geocoding;
pub mod health;

pub use agent::AgentApi;
pub use digipin::DigipinApi;
pub use geocoding::GeocodingApi;
pub use health::HealthApi;
