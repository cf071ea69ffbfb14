//! DIGIPIN conversion endpoints

use crate::client::DigipinClient;
use crate::error::ApiResult;
use digipin_geo::Coordinate;
use serde::{Deserialize, Serialize};

/// DIGIPIN API interface
#[derive(Clone)]
pub struct DigipinApi {
    client: DigipinClient,
}

impl DigipinApi {
    /// Create a new DIGIPIN API interface
    pub(crate) fn new(client: DigipinClient) -> Self {
        Self { client }
    }

    /// Encode a coordinate
    pub async fn encode(&self, latitude: f64, longitude: f64) -> ApiResult<EncodeResponse> {
        let body = EncodeRequest { latitude, longitude };
        self.client.post("api/digipin/encode", &body).await
    }

    /// Decode a pin
    pub async fn decode(&self, pin: &str) -> ApiResult<DecodeResponse> {
        self.client.post("api/digipin/decode", &DecodeRequest { pin }).await
    }

    /// Distance between two pins
    pub async fn distance(&self, start_pin: &str, end_pin: &str) -> ApiResult<DistanceResponse> {
        let body = DistanceRequest { start_pin, end_pin };
        self.client.post("api/digipin/distance", &body).await
    }

    /// Closest of `candidates` to `reference_pin`
    pub async fn nearest(&self, reference_pin: &str, candidates: &[String]) -> ApiResult<NearestResponse> {
        let body = NearestRequest {
            reference_pin,
            candidates,
        };
        self.client.post("api/digipin/nearest", &body).await
    }
}

#[derive(Debug, Serialize)]
struct EncodeRequest {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Serialize)]
struct DecodeRequest<'a> {
    pin: &'a str,
}

#[derive(Debug, Serialize)]
struct DistanceRequest<'a> {
    start_pin: &'a str,
    end_pin: &'a str,
}

#[derive(Debug, Serialize)]
struct NearestRequest<'a> {
    reference_pin: &'a str,
    candidates: &'a [String],
}

/// Encode response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeResponse {
    /// The DIGIPIN
    pub pin: String,
}

/// Decode response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeResponse {
    /// Cell centre latitude
    pub latitude: f64,
    /// Cell centre longitude
    pub longitude: f64,
    /// Cell rectangle, when the backend sends it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<CellBounds>,
}

impl DecodeResponse {
    /// Cell centre as a coordinate
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Corners of a decoded cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellBounds {
    /// South-west corner
    pub south_west: LatLon,
    /// North-east corner
    pub north_east: LatLon,
}

/// Corner of a cell
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LatLon {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
}

/// Distance response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceResponse {
    /// Meters
    #[serde(alias = "distance_meters")]
    pub meters: f64,
    /// Kilometers
    #[serde(default)]
    pub kilometers: Option<f64>,
    /// Human-readable distance
    #[serde(default)]
    pub formatted: Option<String>,
}

impl DistanceResponse {
    /// Distance as shown to users, computed locally if the backend left it out
    #[must_use]
    pub fn display(&self) -> String {
        self.formatted
            .clone()
            .unwrap_or_else(|| format!("{:.2} km", self.meters / 1000.0))
    }
}

/// Nearest response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearestResponse {
    /// Closest candidate
    pub nearest: String,
}
