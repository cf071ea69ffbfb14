//! Haversine distance calculation.
//!
//! Great-circle distance between two points on a sphere of the Earth's mean
//! radius. This is the distance reported between two DIGIPIN cells.

use crate::Coordinate;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculates the great-circle distance between two coordinates in kilometers.
///
/// # Example
/// ```
/// use digipin_geo::{haversine_distance, Coordinate};
///
/// let delhi = Coordinate::new(28.6139, 77.2090);
/// let mumbai = Coordinate::new(19.0760, 72.8777);
///
/// let distance = haversine_distance(&delhi, &mumbai);
/// assert!((distance - 1148.0).abs() < 5.0);
/// ```
#[inline]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_KM)
}

/// Calculates the great-circle distance between two coordinates in meters.
#[inline]
pub fn haversine_distance_meters(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_M)
}

#[inline]
fn haversine_distance_with_radius(from: &Coordinate, to: &Coordinate, radius: f64) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    radius * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELHI: Coordinate = Coordinate { latitude: 28.6139, longitude: 77.2090 };
    const MUMBAI: Coordinate = Coordinate { latitude: 19.0760, longitude: 72.8777 };
    const CHENNAI: Coordinate = Coordinate { latitude: 13.0827, longitude: 80.2707 };
    const KOLKATA: Coordinate = Coordinate { latitude: 22.5726, longitude: 88.3639 };

    #[test]
    fn test_delhi_to_mumbai() {
        let distance = haversine_distance(&DELHI, &MUMBAI);
        // Expected: ~1148 km
        assert!((distance - 1148.0).abs() < 5.0, "Delhi-Mumbai: {distance}");
    }

    #[test]
    fn test_chennai_to_kolkata() {
        let distance = haversine_distance(&CHENNAI, &KOLKATA);
        // Expected: ~1358 km
        assert!((distance - 1358.0).abs() < 5.0, "Chennai-Kolkata: {distance}");
    }

    #[test]
    fn test_same_point_zero_distance() {
        assert!(haversine_distance(&DELHI, &DELHI).abs() < 0.001);
    }

    #[test]
    fn test_symmetry() {
        let d1 = haversine_distance(&DELHI, &KOLKATA);
        let d2 = haversine_distance(&KOLKATA, &DELHI);
        assert!((d1 - d2).abs() < 0.001);
    }

    #[test]
    fn test_meters_conversion() {
        let km = haversine_distance(&MUMBAI, &CHENNAI);
        let meters = haversine_distance_meters(&MUMBAI, &CHENNAI);
        assert!((meters - km * 1000.0).abs() < 1.0);
    }
}
