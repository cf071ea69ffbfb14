//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
#[derive(Debug, Error)]
pub enum GeoError {
    /// The text is not a well-formed DIGIPIN
    #[error("Invalid DIGIPIN `{pin}`: {reason}")]
    InvalidPin {
        /// Input as given
        pin: String,
        /// What was wrong with it
        reason: String,
    },

    /// Coordinate lies outside the DIGIPIN grid
    #[error("Coordinate ({latitude}, {longitude}) is outside the DIGIPIN grid (latitude 2.5..=38.5, longitude 63.5..=99.5)")]
    OutOfRange {
        /// Latitude in degrees
        latitude: f64,
        /// Longitude in degrees
        longitude: f64,
    },

    /// Coordinate rejected by the India geofence
    #[error("Coordinate ({latitude}, {longitude}) is outside India; valid bounds are {bounds}")]
    OutsideIndia {
        /// Latitude in degrees
        latitude: f64,
        /// Longitude in degrees
        longitude: f64,
        /// The bounding box, for user-facing messages
        bounds: crate::GeoBounds,
    },

    /// Nearest-pin search was given nothing to compare against
    #[error("No DIGIPIN candidates supplied")]
    EmptyCandidates,

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl GeoError {
    pub(crate) fn invalid_pin(pin: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPin {
            pin: pin.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn outside_india(latitude: f64, longitude: f64) -> Self {
        Self::OutsideIndia {
            latitude,
            longitude,
            bounds: crate::INDIA_BOUNDS,
        }
    }
}

/// Error code for integration with `digipin-core` error handling.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Malformed DIGIPIN
    InvalidPin = 10001,
    /// Coordinate outside the grid
    OutOfRange = 10002,
    /// Coordinate outside India
    OutsideIndia = 10003,
    /// Empty candidate list
    EmptyCandidates = 10004,
    /// JSON parsing error
    JsonParsing = 10005,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidPin { .. } => GeoErrorCode::InvalidPin,
            GeoError::OutOfRange { .. } => GeoErrorCode::OutOfRange,
            GeoError::OutsideIndia { .. } => GeoErrorCode::OutsideIndia,
            GeoError::EmptyCandidates => GeoErrorCode::EmptyCandidates,
            GeoError::JsonError(_) => GeoErrorCode::JsonParsing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outside_india_message_names_bounds() {
        let err = GeoError::outside_india(40.0, 80.0);
        assert_eq!(err.code(), GeoErrorCode::OutsideIndia);
        assert!(err.to_string().contains("[[6.5, 68.0], [37.1, 97.5]]"));
    }

    #[test]
    fn test_invalid_pin_message() {
        let err = GeoError::invalid_pin("39J-438", "DIGIPIN must have 10 characters");
        assert_eq!(err.to_string(), "Invalid DIGIPIN `39J-438`: DIGIPIN must have 10 characters");
    }
}
