//! DIGIPIN geospatial utilities.
//!
//! This crate provides:
//! - The India geofence that gates every conversion
//! - The DIGIPIN grid codec (encode, decode, validation)
//! - Haversine distance and nearest-pin search
//! - Batch conversion with optional parallelism
//! - WASM bindings for browser usage
//!
//! # Example
//!
//! ```
//! use digipin_geo::{is_within_india, DigipinCodec, GridCodec};
//!
//! assert!(is_within_india(28.6139, 77.2090));
//!
//! let pin = GridCodec.encode(28.6139, 77.2090).unwrap();
//! assert_eq!(pin, "39J-438-TJC7");
//!
//! let centre = GridCodec.decode(&pin).unwrap();
//! assert_eq!((centre.latitude, centre.longitude), (28.613901, 77.208998));
//! ```

mod codec;
mod error;
mod haversine;
pub mod batch;
pub mod geofence;
pub mod pin;

#[cfg(feature = "wasm")]
mod wasm;

pub use codec::{format_distance, DigipinCodec, DistanceSummary, GridCodec};
pub use error::{GeoError, GeoErrorCode, Result};
pub use geofence::{is_within_india, is_within_india_strict, Rejection, INDIA_BOUNDS};
pub use haversine::{haversine_distance, haversine_distance_meters, EARTH_RADIUS_KM, EARTH_RADIUS_M};
pub use pin::{is_valid_pin, DecodedPin, DIGIPIN_BOUNDS};

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Returns true if the coordinate lies on the globe.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }

    /// Rounds both components to six decimals, the precision decoded pins are
    /// reported with.
    #[inline]
    pub fn rounded(&self) -> Self {
        Self::new(round6(self.latitude), round6(self.longitude))
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

#[inline]
fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

/// An axis-aligned rectangle between two corners.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GeoBounds {
    /// Minimum latitude and longitude
    pub south_west: Coordinate,
    /// Maximum latitude and longitude
    pub north_east: Coordinate,
}

impl GeoBounds {
    /// Creates bounds from two corners.
    pub const fn new(south_west: Coordinate, north_east: Coordinate) -> Self {
        Self { south_west, north_east }
    }

    /// Edges are inclusive. Written as negated strict comparisons so that a NaN
    /// component is never rejected here.
    #[inline]
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        !(lat < self.south_west.latitude
            || lat > self.north_east.latitude
            || lng < self.south_west.longitude
            || lng > self.north_east.longitude)
    }

    /// Centre of the rectangle.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.south_west.latitude + self.north_east.latitude) / 2.0,
            (self.south_west.longitude + self.north_east.longitude) / 2.0,
        )
    }
}

impl std::fmt::Display for GeoBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[[{:?}, {:?}], [{:?}, {:?}]]",
            self.south_west.latitude,
            self.south_west.longitude,
            self.north_east.latitude,
            self.north_east.longitude
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_creation() {
        let coord = Coordinate::new(28.6139, 77.2090);
        assert_eq!(coord.latitude, 28.6139);
        assert_eq!(coord.longitude, 77.2090);
    }

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(0.0, 0.0).is_valid());
        assert!(Coordinate::new(-90.0, -180.0).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_coordinate_from_tuple() {
        let coord: Coordinate = (19.0760, 72.8777).into();
        assert_eq!(coord.longitude, 72.8777);
    }

    #[test]
    fn test_rounded_to_six_decimals() {
        let coord = Coordinate::new(28.613_901_138_305_664, 77.208_997_726_440_43).rounded();
        assert_eq!(coord, Coordinate::new(28.613901, 77.208998));
    }

    #[test]
    fn test_bounds_display_matches_alert_text() {
        assert_eq!(INDIA_BOUNDS.to_string(), "[[6.5, 68.0], [37.1, 97.5]]");
    }

    #[test]
    fn test_bounds_center() {
        let center = GeoBounds::new(Coordinate::new(0.0, 0.0), Coordinate::new(10.0, 20.0)).center();
        assert_eq!(center, Coordinate::new(5.0, 10.0));
    }
}
