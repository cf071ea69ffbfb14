//! WASM bindings for the geo crate.
//!
//! These bindings let the browser run the geofence and the DIGIPIN codec
//! without a round trip to the backend.

use crate::{batch, geofence, DigipinCodec, GridCodec};
use wasm_bindgen::prelude::*;

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Returns true when the coordinate is inside the India geofence.
#[wasm_bindgen(js_name = isWithinIndia)]
pub fn is_within_india(lat: f64, lng: f64) -> bool {
    geofence::is_within_india(lat, lng)
}

/// Encodes a coordinate that passed the geofence.
///
/// # Errors
/// Throws the error message when the coordinate is outside India.
#[wasm_bindgen]
pub fn encode(lat: f64, lng: f64) -> Result<String, JsValue> {
    if !geofence::is_within_india_strict(lat, lng) {
        return Err(to_js_error(crate::GeoError::outside_india(lat, lng)));
    }
    GridCodec.encode(lat, lng).map_err(to_js_error)
}

/// Decodes a pin.
///
/// # Returns
/// JSON string `{"latitude": .., "longitude": ..}`
#[wasm_bindgen]
pub fn decode(pin: &str) -> Result<String, JsValue> {
    let centre = GridCodec.decode(pin).map_err(to_js_error)?;
    serde_json::to_string(&centre).map_err(to_js_error)
}

/// Distance between two pins.
///
/// # Returns
/// JSON string of `{"meters", "kilometers", "formatted"}`
#[wasm_bindgen]
pub fn distance(pin_a: &str, pin_b: &str) -> Result<String, JsValue> {
    let summary = crate::DistanceSummary::between(&GridCodec, pin_a, pin_b).map_err(to_js_error)?;
    serde_json::to_string(&summary).map_err(to_js_error)
}

/// Closest candidate to `base`.
///
/// # Arguments
/// * `base` - Reference pin
/// * `candidates` - Comma or newline separated pins
#[wasm_bindgen]
pub fn nearest(base: &str, candidates: &str) -> Result<String, JsValue> {
    let candidates = batch::parse_pin_list(candidates);
    GridCodec.nearest(base, &candidates).map_err(to_js_error)
}

/// Converts a block of batch text.
///
/// # Returns
/// JSON string `{"encoded": [BatchRow], "decoded": [BatchRow]}`
#[wasm_bindgen(js_name = convertBatch)]
pub fn convert_batch(text: &str) -> Result<String, JsValue> {
    let input = batch::parse_batch_input(text);
    let result = serde_json::json!({
        "encoded": batch::encode_rows(&input.coordinates()),
        "decoded": batch::decode_rows(&input.pins()),
    });
    Ok(result.to_string())
}

/// Candidates ranked by distance from `reference`.
///
/// # Arguments
/// * `reference` - Reference pin
/// * `candidates` - Array of pin strings; other values are skipped
/// * `max_results` - Maximum results to return (0 for all)
///
/// # Returns
/// JSON string of `[{"pin", "distance"}]`
#[wasm_bindgen(js_name = rankByDistance)]
pub fn rank_by_distance(reference: &str, candidates: &js_sys::Array, max_results: u32) -> Result<String, JsValue> {
    let candidates: Vec<String> = candidates.iter().filter_map(|value| value.as_string()).collect();
    let max = if max_results == 0 { None } else { Some(max_results as usize) };

    let ranked = batch::rank_by_distance(reference, &candidates, max).map_err(to_js_error)?;
    serde_json::to_string(&ranked).map_err(to_js_error)
}
