//! India geofence.
//!
//! A coarse approximation of Indian territory: a bounding box with four
//! rectangular cut-outs along the Kashmir, China, Pakistan, Myanmar and
//! Bangladesh borders. Every conversion and every coordinate read from a
//! shareable link is checked against it.

use crate::{Coordinate, GeoBounds};
use serde::Serialize;

/// Bounding box of the geofence: SW (6.5, 68.0), NE (37.1, 97.5).
pub const INDIA_BOUNDS: GeoBounds = GeoBounds::new(
    Coordinate::new(6.5, 68.0),
    Coordinate::new(37.1, 97.5),
);

/// Why a coordinate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// Outside [`INDIA_BOUNDS`]
    OutsideBounds,
    /// North of Kashmir: lat > 35.5 and lng > 74.0
    NorthOfKashmir,
    /// Northeast corner: lat > 28.0 and lng > 95.0
    NorthEast,
    /// Northwest corner (Pakistan): lat < 23.0 and lng < 70.0
    NorthWest,
    /// Far east (Bangladesh): lat < 22.0 and lng > 88.0
    FarEast,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Rejection::OutsideBounds => "outside the India bounding box",
            Rejection::NorthOfKashmir => "north of Kashmir",
            Rejection::NorthEast => "in the northeast cut-out",
            Rejection::NorthWest => "in the northwest cut-out",
            Rejection::FarEast => "in the far-east cut-out",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy)]
enum Edge {
    Above(f64),
    Below(f64),
}

impl Edge {
    #[inline]
    fn holds(self, value: f64) -> bool {
        match self {
            Edge::Above(limit) => value > limit,
            Edge::Below(limit) => value < limit,
        }
    }
}

/// A cut-out matches when both its latitude and longitude edges hold.
#[derive(Debug, Clone, Copy)]
struct ExclusionRule {
    rejection: Rejection,
    latitude: Edge,
    longitude: Edge,
}

impl ExclusionRule {
    #[inline]
    fn matches(&self, lat: f64, lng: f64) -> bool {
        self.latitude.holds(lat) && self.longitude.holds(lng)
    }
}

/// Evaluated in this order after the bounding box.
const EXCLUSION_RULES: [ExclusionRule; 4] = [
    ExclusionRule {
        rejection: Rejection::NorthOfKashmir,
        latitude: Edge::Above(35.5),
        longitude: Edge::Above(74.0),
    },
    ExclusionRule {
        rejection: Rejection::NorthEast,
        latitude: Edge::Above(28.0),
        longitude: Edge::Above(95.0),
    },
    ExclusionRule {
        rejection: Rejection::NorthWest,
        latitude: Edge::Below(23.0),
        longitude: Edge::Below(70.0),
    },
    ExclusionRule {
        rejection: Rejection::FarEast,
        latitude: Edge::Below(22.0),
        longitude: Edge::Above(88.0),
    },
];

/// Classifies a coordinate, reporting the first rule that rejects it.
///
/// No range pre-validation is done. NaN passes every comparison and is
/// accepted here; use [`is_within_india_strict`] to refuse non-finite input.
pub fn check(lat: f64, lng: f64) -> Result<(), Rejection> {
    if !INDIA_BOUNDS.contains(lat, lng) {
        return Err(Rejection::OutsideBounds);
    }

    match EXCLUSION_RULES.iter().find(|rule| rule.matches(lat, lng)) {
        Some(rule) => Err(rule.rejection),
        None => Ok(()),
    }
}

/// Returns true when the coordinate is inside the geofence.
///
/// # Example
/// ```
/// use digipin_geo::is_within_india;
///
/// assert!(is_within_india(20.0, 80.0));
/// assert!(!is_within_india(40.0, 80.0));
/// ```
#[inline]
pub fn is_within_india(lat: f64, lng: f64) -> bool {
    check(lat, lng).is_ok()
}

/// Like [`is_within_india`] but also requires both components to be finite.
#[inline]
pub fn is_within_india_strict(lat: f64, lng: f64) -> bool {
    lat.is_finite() && lng.is_finite() && is_within_india(lat, lng)
}

/// [`is_within_india_strict`] for a [`Coordinate`].
#[inline]
pub fn contains(coord: &Coordinate) -> bool {
    is_within_india_strict(coord.latitude, coord.longitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_interior_point_accepted() {
        assert!(is_within_india(20.0, 80.0));
        assert!(is_within_india(28.6139, 77.2090)); // Delhi
        assert!(is_within_india(19.0760, 72.8777)); // Mumbai
        assert!(is_within_india(12.9716, 77.5946)); // Bengaluru
        assert!(is_within_india(22.5726, 88.3639)); // Kolkata
    }

    #[test]
    fn test_bounding_box_edges_are_inclusive() {
        assert!(INDIA_BOUNDS.contains(6.5, 68.0));
        assert!(INDIA_BOUNDS.contains(37.1, 97.5));
        assert!(!INDIA_BOUNDS.contains(6.49, 80.0));
        assert!(!INDIA_BOUNDS.contains(20.0, 97.51));
    }

    #[test]
    fn test_corners_fall_into_cut_outs() {
        assert_eq!(check(6.5, 68.0), Err(Rejection::NorthWest));
        assert_eq!(check(37.1, 97.5), Err(Rejection::NorthOfKashmir));
    }

    #[test]
    fn test_inclusive_edges_on_open_stretches() {
        assert!(is_within_india(6.5, 80.0));
        assert!(is_within_india(30.0, 68.0));
        assert!(is_within_india(25.0, 97.5));
        assert!(is_within_india(37.1, 73.0));
    }

    #[test]
    fn test_north_of_kashmir() {
        assert_eq!(check(36.0, 75.0), Err(Rejection::NorthOfKashmir));
        assert!(is_within_india(35.4, 75.0));
    }

    #[test]
    fn test_northeast_cut_out() {
        assert_eq!(check(29.0, 96.0), Err(Rejection::NorthEast));
        assert!(is_within_india(27.9, 96.0));
    }

    #[test]
    fn test_northwest_cut_out() {
        assert_eq!(check(22.0, 69.0), Err(Rejection::NorthWest));
        assert!(is_within_india(23.0, 69.0));
    }

    #[test]
    fn test_far_east_cut_out() {
        assert_eq!(check(21.5, 89.0), Err(Rejection::FarEast));
        assert!(is_within_india(22.5, 89.0));
    }

    #[test]
    fn test_out_of_range_rejected_without_error() {
        assert_eq!(check(40.0, 80.0), Err(Rejection::OutsideBounds));
        assert!(!is_within_india(-28.6, -77.2));
        assert!(!is_within_india(0.0, 0.0));
        assert!(!is_within_india(f64::INFINITY, 80.0));
    }

    #[test]
    fn test_nan_falls_through_plain_check() {
        // Comparisons against NaN are false, so no rule fires.
        assert!(is_within_india(f64::NAN, 80.0));
        assert!(is_within_india(20.0, f64::NAN));
        assert!(is_within_india(f64::NAN, f64::NAN));
    }

    #[test]
    fn test_strict_check_refuses_nan() {
        assert!(!is_within_india_strict(f64::NAN, 80.0));
        assert!(!is_within_india_strict(20.0, f64::NAN));
        assert!(is_within_india_strict(20.0, 80.0));
        assert!(contains(&Coordinate::new(20.0, 80.0)));
    }

    #[test]
    fn test_rejection_display() {
        assert_eq!(Rejection::FarEast.to_string(), "in the far-east cut-out");
    }

    proptest! {
        #[test]
        fn south_of_box_always_rejected(lat in -90.0f64..6.4999, lng in -180.0f64..180.0) {
            prop_assert!(!is_within_india(lat, lng));
        }

        #[test]
        fn north_of_box_always_rejected(lat in 37.1001f64..90.0, lng in -180.0f64..180.0) {
            prop_assert!(!is_within_india(lat, lng));
        }

        #[test]
        fn west_of_box_always_rejected(lat in -90.0f64..90.0, lng in -180.0f64..67.9999) {
            prop_assert!(!is_within_india(lat, lng));
        }

        #[test]
        fn east_of_box_always_rejected(lat in -90.0f64..90.0, lng in 97.5001f64..180.0) {
            prop_assert!(!is_within_india(lat, lng));
        }

        #[test]
        fn accepted_points_lie_in_box(lat in -90.0f64..90.0, lng in -180.0f64..180.0) {
            if is_within_india(lat, lng) {
                prop_assert!(INDIA_BOUNDS.contains(lat, lng));
            }
        }
    }
}
