//! DIGIPIN grid encoding.
//!
//! The grid covers latitude 2.5..=38.5 and longitude 63.5..=99.5. Each of the
//! ten levels splits the current cell into a 4x4 block and records one symbol,
//! so a pin names a cell roughly 3.8 m on a side. Pins are written as
//! `XXX-XXX-XXXX`.

use crate::error::{GeoError, Result};
use crate::{Coordinate, GeoBounds};
use serde::{Deserialize, Serialize};

/// Symbols by row (north first) and column (west first).
const GRID: [[char; 4]; 4] = [
    ['F', 'C', '9', '8'],
    ['J', '3', '2', '7'],
    ['K', '4', '5', '6'],
    ['L', 'M', 'P', 'T'],
];

/// Number of symbols in a pin, without separators.
pub const PIN_LENGTH: usize = 10;

/// Area covered by the grid.
pub const DIGIPIN_BOUNDS: GeoBounds = GeoBounds::new(
    Coordinate::new(2.5, 63.5),
    Coordinate::new(38.5, 99.5),
);

/// Centre and cell of a decoded pin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecodedPin {
    /// Cell centre, rounded to six decimals
    pub center: Coordinate,
    /// Exact cell rectangle
    pub bounds: GeoBounds,
}

/// Encodes a coordinate into a DIGIPIN.
///
/// Fails with [`GeoError::OutOfRange`] outside [`DIGIPIN_BOUNDS`] (edges
/// included), which also covers NaN.
///
/// # Example
/// ```
/// use digipin_geo::pin::encode;
///
/// assert_eq!(encode(19.0760, 72.8777).unwrap(), "4FK-595-8823");
/// ```
pub fn encode(lat: f64, lng: f64) -> Result<String> {
    let sw = DIGIPIN_BOUNDS.south_west;
    let ne = DIGIPIN_BOUNDS.north_east;
    if !(sw.latitude..=ne.latitude).contains(&lat) || !(sw.longitude..=ne.longitude).contains(&lng)
    {
        return Err(GeoError::OutOfRange {
            latitude: lat,
            longitude: lng,
        });
    }

    let (mut min_lat, mut max_lat) = (sw.latitude, ne.latitude);
    let (mut min_lon, mut max_lon) = (sw.longitude, ne.longitude);
    let mut code = String::with_capacity(PIN_LENGTH + 2);

    for level in 1..=PIN_LENGTH {
        let lat_step = (max_lat - min_lat) / 4.0;
        let lon_step = (max_lon - min_lon) / 4.0;

        let row = (3 - cell_index(lat - min_lat, lat_step)).clamp(0, 3);
        let col = cell_index(lng - min_lon, lon_step).clamp(0, 3);

        code.push(GRID[row as usize][col as usize]);
        if level == 3 || level == 6 {
            code.push('-');
        }

        max_lat = min_lat + lat_step * f64::from(4 - row);
        min_lat += lat_step * f64::from(3 - row);
        min_lon += lon_step * f64::from(col);
        max_lon = min_lon + lon_step;
    }

    Ok(code)
}

#[inline]
#[allow(clippy::cast_possible_truncation)]
fn cell_index(offset: f64, step: f64) -> i32 {
    (offset / step).floor() as i32
}

/// Decodes a DIGIPIN into its cell.
///
/// Surrounding whitespace, lowercase letters and `-` separators are accepted.
pub fn decode(pin: &str) -> Result<DecodedPin> {
    let symbols = normalize(pin)?;

    let (mut min_lat, mut max_lat) = (DIGIPIN_BOUNDS.south_west.latitude, DIGIPIN_BOUNDS.north_east.latitude);
    let (mut min_lon, mut max_lon) = (DIGIPIN_BOUNDS.south_west.longitude, DIGIPIN_BOUNDS.north_east.longitude);

    for symbol in symbols.chars() {
        // normalize() guarantees every symbol is on the grid
        let (row, col) = grid_position(symbol).ok_or_else(|| GeoError::invalid_pin(pin, "unknown symbol"))?;
        let lat_step = (max_lat - min_lat) / 4.0;
        let lon_step = (max_lon - min_lon) / 4.0;

        max_lat = min_lat + lat_step * f64::from(4 - row);
        min_lat += lat_step * f64::from(3 - row);
        min_lon += lon_step * f64::from(col);
        max_lon = min_lon + lon_step;
    }

    let bounds = GeoBounds::new(
        Coordinate::new(min_lat, min_lon),
        Coordinate::new(max_lat, max_lon),
    );

    Ok(DecodedPin {
        center: bounds.center().rounded(),
        bounds,
    })
}

fn grid_position(symbol: char) -> Option<(u8, u8)> {
    GRID.iter().enumerate().find_map(|(row, symbols)| {
        symbols
            .iter()
            .position(|&s| s == symbol)
            .map(|col| (row as u8, col as u8))
    })
}

/// Strips whitespace and separators and uppercases; fails unless exactly ten
/// grid symbols remain.
pub fn normalize(pin: &str) -> Result<String> {
    let clean: String = pin
        .trim()
        .chars()
        .filter(|&c| c != '-')
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if clean.chars().count() != PIN_LENGTH {
        return Err(GeoError::invalid_pin(pin, format!("DIGIPIN must have {PIN_LENGTH} characters")));
    }

    if let Some(bad) = clean.chars().find(|&c| grid_position(c).is_none()) {
        return Err(GeoError::invalid_pin(pin, format!("invalid DIGIPIN character `{bad}`")));
    }

    Ok(clean)
}

/// Canonical `XXX-XXX-XXXX` spelling of a pin.
pub fn canonical(pin: &str) -> Result<String> {
    let clean = normalize(pin)?;
    Ok(format!("{}-{}-{}", &clean[..3], &clean[3..6], &clean[6..]))
}

/// Returns true if `pin` decodes.
#[inline]
pub fn is_valid_pin(pin: &str) -> bool {
    normalize(pin).is_ok()
}
