//! CLI commands

pub mod batch;
pub mod convert;
pub mod favorites;
pub mod geocode;
pub mod remote;
pub mod share;

use digipin_cli::OutputFormat;
use digipin_core::config::Config;
use digipin_core::{Error, ErrorCode};
use digipin_geo::GeoError;
use digipin_state::{SessionError, StorageError};

/// Settings every command sees
pub struct Context {
    pub format: OutputFormat,
    pub config: Config,
}

impl Context {
    pub fn new(format: OutputFormat, config: Config) -> Self {
        Self { format, config }
    }

    pub fn is_json(&self) -> bool {
        self.format.is_json()
    }
}

/// Maps a codec failure onto the toolkit error it corresponds to
pub fn geo_error(error: GeoError) -> Error {
    match error {
        GeoError::InvalidPin { pin, reason } => Error::invalid_pin(&pin).with_context(reason),
        GeoError::OutsideIndia { latitude, longitude, .. } => Error::outside_geofence(latitude, longitude),
        GeoError::OutOfRange { .. } => Error::new(ErrorCode::OutOfGrid, error.to_string()),
        GeoError::EmptyCandidates => Error::new(ErrorCode::NoCandidates, error.to_string())
            .with_suggestion("Pass at least one pin with --candidates"),
        GeoError::JsonError(e) => Error::new(ErrorCode::InvalidFormat, e.to_string()).with_source(e),
    }
}

/// Same as [`geo_error`] for session operations
pub fn session_error(error: SessionError) -> Error {
    match error {
        SessionError::OutsideIndia { latitude, longitude, .. } => Error::outside_geofence(latitude, longitude),
        SessionError::Codec(e) => geo_error(e),
    }
}

/// Favorites file failures
pub fn storage_error(error: StorageError) -> Error {
    let code = match error {
        StorageError::Serialize(_) => ErrorCode::StorageCorrupt,
        StorageError::Io { .. } => ErrorCode::StorageWriteFailed,
        StorageError::Unavailable(_) => ErrorCode::StorageError,
    };
    Error::new(code, error.to_string()).with_source(error)
}

/// Rejects coordinates outside India before they reach a codec
pub fn ensure_within_india(lat: f64, lng: f64) -> Result<(), Error> {
    match digipin_geo::geofence::check(lat, lng) {
        Ok(()) if lat.is_finite() && lng.is_finite() => Ok(()),
        Ok(()) => Err(Error::validation(format!("Coordinate ({lat}, {lng}) is not a number"))),
        Err(rejection) => Err(Error::outside_geofence(lat, lng).with_context(rejection.to_string())),
    }
}
