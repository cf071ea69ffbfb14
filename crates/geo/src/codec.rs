//! The DIGIPIN operations the rest of the toolkit is written against.

use crate::error::{GeoError, Result};
use crate::{haversine_distance_meters, pin, Coordinate};
use serde::{Deserialize, Serialize};

/// Encode, decode, distance and nearest-match over DIGIPINs.
///
/// [`GridCodec`] is the native implementation; tests substitute doubles.
/// Only `encode` and `decode` are required, the rest derive from them.
pub trait DigipinCodec {
    /// Encodes a coordinate. Fails for coordinates the codec cannot represent.
    fn encode(&self, lat: f64, lng: f64) -> Result<String>;

    /// Decodes a pin to its cell centre.
    fn decode(&self, pin: &str) -> Result<Coordinate>;

    /// Encodes every coordinate; one failure does not stop the others.
    fn batch_encode(&self, coords: &[Coordinate]) -> Vec<Result<String>> {
        coords.iter().map(|c| self.encode(c.latitude, c.longitude)).collect()
    }

    /// Decodes every pin; `None` marks an entry that failed.
    fn batch_decode(&self, pins: &[String]) -> Vec<Option<Coordinate>> {
        pins.iter().map(|p| self.decode(p).ok()).collect()
    }

    /// Great-circle distance between two cell centres, in meters.
    fn distance(&self, pin_a: &str, pin_b: &str) -> Result<f64> {
        let a = self.decode(pin_a)?;
        let b = self.decode(pin_b)?;
        Ok(haversine_distance_meters(&a, &b))
    }

    /// The candidate closest to `base`. Ties keep the earlier candidate.
    fn nearest(&self, base: &str, candidates: &[String]) -> Result<String> {
        let origin = self.decode(base)?;
        let mut best: Option<(&String, f64)> = None;

        for candidate in candidates {
            let distance = haversine_distance_meters(&origin, &self.decode(candidate)?);
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((candidate, distance));
            }
        }

        best.map(|(pin, _)| pin.clone()).ok_or(GeoError::EmptyCandidates)
    }
}

/// Native implementation of the DIGIPIN grid.
///
/// `encode` only checks the grid area; callers gate on the India geofence.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridCodec;

impl DigipinCodec for GridCodec {
    fn encode(&self, lat: f64, lng: f64) -> Result<String> {
        pin::encode(lat, lng)
    }

    fn decode(&self, pin: &str) -> Result<Coordinate> {
        pin::decode(pin).map(|decoded| decoded.center)
    }

    fn batch_encode(&self, coords: &[Coordinate]) -> Vec<Result<String>> {
        crate::batch::encode_all(coords)
    }

    fn batch_decode(&self, pins: &[String]) -> Vec<Option<Coordinate>> {
        crate::batch::decode_all(pins)
    }
}

/// Distance between two pins in the units a user reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceSummary {
    /// Meters
    pub meters: f64,
    /// Kilometers
    pub kilometers: f64,
    /// Kilometers with two decimals, e.g. `"1148.10 km"`
    pub formatted: String,
}

impl DistanceSummary {
    /// Summarises a distance given in meters.
    pub fn from_meters(meters: f64) -> Self {
        let kilometers = meters / 1000.0;
        Self {
            meters,
            kilometers,
            formatted: format!("{kilometers:.2} km"),
        }
    }

    /// Distance between two pins through `codec`.
    pub fn between<C: DigipinCodec + ?Sized>(codec: &C, pin_a: &str, pin_b: &str) -> Result<Self> {
        codec.distance(pin_a, pin_b).map(Self::from_meters)
    }
}

/// Meters below one kilometer, kilometers with two decimals above.
///
/// # Example
/// ```
/// use digipin_geo::format_distance;
///
/// assert_eq!(format_distance(950.0), "950 m");
/// assert_eq!(format_distance(1148096.4), "1148.10 km");
/// ```
pub fn format_distance(meters: f64) -> String {
    let rounded = meters.round();
    if rounded < 1000.0 {
        format!("{rounded} m")
    } else {
        format!("{:.2} km", meters / 1000.0)
    }
}
