//! Batch conversion with optional parallelism.
//!
//! Free-form text is split into coordinate lines and pin lines, each line is
//! converted independently, and a failure on one line never aborts the rest.

use crate::error::{GeoError, Result};
use crate::{geofence, haversine_distance_meters, pin, Coordinate};
use serde::{Deserialize, Serialize};

/// One non-blank line of batch input.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchEntry {
    /// A `lat,lng` (or `lat lng`) line
    Coordinate {
        /// 1-based line number
        line: usize,
        /// Parsed pair
        coordinate: Coordinate,
    },
    /// Anything else, treated as a pin
    Pin {
        /// 1-based line number
        line: usize,
        /// Trimmed text
        pin: String,
    },
}

/// Parsed batch text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchInput {
    /// Entries in input order
    pub entries: Vec<BatchEntry>,
}

impl BatchInput {
    /// Coordinate lines with their line numbers.
    pub fn coordinates(&self) -> Vec<(usize, Coordinate)> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                BatchEntry::Coordinate { line, coordinate } => Some((*line, *coordinate)),
                BatchEntry::Pin { .. } => None,
            })
            .collect()
    }

    /// Pin lines with their line numbers.
    pub fn pins(&self) -> Vec<(usize, String)> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                BatchEntry::Pin { line, pin } => Some((*line, pin.clone())),
                BatchEntry::Coordinate { .. } => None,
            })
            .collect()
    }

    /// True when there is nothing to convert.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Splits text into one entry per non-blank line.
///
/// # Example
/// ```
/// use digipin_geo::batch::parse_batch_input;
///
/// let input = parse_batch_input("28.6139,77.2090\n\n39J-438-TJC7\n");
/// assert_eq!(input.coordinates().len(), 1);
/// assert_eq!(input.pins(), vec![(3, "39J-438-TJC7".to_string())]);
/// ```
pub fn parse_batch_input(text: &str) -> BatchInput {
    let entries = text
        .lines()
        .enumerate()
        .filter_map(|(index, raw)| {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return None;
            }
            let line = index + 1;
            Some(match parse_coordinate(trimmed) {
                Some(coordinate) => BatchEntry::Coordinate { line, coordinate },
                None => BatchEntry::Pin {
                    line,
                    pin: trimmed.to_string(),
                },
            })
        })
        .collect();

    BatchInput { entries }
}

/// Parses `lat,lng` or `lat lng`; both halves must be numbers.
pub fn parse_coordinate(text: &str) -> Option<Coordinate> {
    let mut parts = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty());

    let lat = parts.next()?.parse::<f64>().ok()?;
    let lng = parts.next()?.parse::<f64>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Coordinate::new(lat, lng))
}

/// Splits a comma or newline separated list of pins, dropping blanks.
pub fn parse_pin_list(text: &str) -> Vec<String> {
    text.split([',', '\n', '\r'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

/// Encodes every coordinate on the grid.
pub fn encode_all(coords: &[Coordinate]) -> Vec<Result<String>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        coords.par_iter().map(|c| pin::encode(c.latitude, c.longitude)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        coords.iter().map(|c| pin::encode(c.latitude, c.longitude)).collect()
    }
}

/// Decodes every pin; `None` marks a pin that failed.
pub fn decode_all(pins: &[String]) -> Vec<Option<Coordinate>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        pins.par_iter().map(|p| pin::decode(p).ok().map(|d| d.center)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        pins.iter().map(|p| pin::decode(p).ok().map(|d| d.center)).collect()
    }
}

/// Outcome of converting one batch line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRow {
    /// 1-based line number in the input
    pub line: usize,
    /// The input as read
    pub input: String,
    /// Converted value, when conversion succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Why conversion failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchRow {
    fn from_result(line: usize, input: String, result: Result<String>) -> Self {
        match result {
            Ok(output) => Self { line, input, output: Some(output), error: None },
            Err(e) => Self { line, input, output: None, error: Some(e.to_string()) },
        }
    }

    /// True when the line converted.
    pub fn is_ok(&self) -> bool {
        self.output.is_some()
    }
}

/// Encodes coordinate lines, rejecting those outside the India geofence.
pub fn encode_rows(entries: &[(usize, Coordinate)]) -> Vec<BatchRow> {
    let convert = |&(line, c): &(usize, Coordinate)| {
        let result = if geofence::contains(&c) {
            pin::encode(c.latitude, c.longitude)
        } else {
            Err(GeoError::outside_india(c.latitude, c.longitude))
        };
        BatchRow::from_result(line, format!("{},{}", c.latitude, c.longitude), result)
    };

    #[cfg(feature = "parallel")]
    let rows: Vec<BatchRow> = {
        use rayon::prelude::*;
        entries.par_iter().map(convert).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let rows: Vec<BatchRow> = entries.iter().map(convert).collect();

    log_summary("encode", &rows);
    rows
}

/// Decodes pin lines; a pin whose centre falls outside the geofence fails.
pub fn decode_rows(entries: &[(usize, String)]) -> Vec<BatchRow> {
    let convert = |(line, text): &(usize, String)| {
        let result = pin::decode(text).and_then(|decoded| {
            let c = decoded.center;
            if geofence::contains(&c) {
                Ok(format!("{:.6},{:.6}", c.latitude, c.longitude))
            } else {
                Err(GeoError::outside_india(c.latitude, c.longitude))
            }
        });
        BatchRow::from_result(*line, text.clone(), result)
    };

    #[cfg(feature = "parallel")]
    let rows: Vec<BatchRow> = {
        use rayon::prelude::*;
        entries.par_iter().map(convert).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let rows: Vec<BatchRow> = entries.iter().map(convert).collect();

    log_summary("decode", &rows);
    rows
}

fn log_summary(operation: &str, rows: &[BatchRow]) {
    let failed = rows.iter().filter(|r| !r.is_ok()).count();
    tracing::debug!(operation, total = rows.len(), failed, "batch converted");
}

/// Distance of one candidate from a reference pin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedPin {
    /// Candidate as given
    pub pin: String,
    /// Meters from the reference (infinite when the candidate is invalid)
    pub distance: f64,
}

/// Ranks candidates by distance from `reference`, closest first.
///
/// Invalid candidates sort last with an infinite distance. `max_results`
/// truncates the ranking.
pub fn rank_by_distance(
    reference: &str,
    candidates: &[String],
    max_results: Option<usize>,
) -> Result<Vec<RankedPin>> {
    let origin = pin::decode(reference)?.center;

    let mut ranked: Vec<RankedPin> = candidates
        .iter()
        .map(|candidate| RankedPin {
            pin: candidate.clone(),
            distance: pin::decode(candidate)
                .map(|d| haversine_distance_meters(&origin, &d.center))
                .unwrap_or(f64::INFINITY),
        })
        .collect();

    // Stable sort keeps input order among equal distances
    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    if let Some(max) = max_results {
        ranked.truncate(max);
    }

    Ok(ranked)
}
