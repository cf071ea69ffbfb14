//! Nominatim geocoding
//!
//! The public instance allows one request per second; interactive search
//! should go through a [`crate::Debouncer`].

use crate::client::DigipinClient;
use crate::error::ApiResult;
use digipin_geo::Coordinate;
use serde::{Deserialize, Serialize};

/// Geocoding API interface
#[derive(Clone)]
pub struct GeocodingApi {
    client: DigipinClient,
}

impl GeocodingApi {
    /// Create a new geocoding API interface
    pub(crate) fn new(client: DigipinClient) -> Self {
        Self { client }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.client.config().geocoder_url.trim_end_matches('/'))
    }

    /// Place name at a coordinate, `None` when Nominatim has nothing there
    pub async fn reverse(&self, latitude: f64, longitude: f64) -> ApiResult<Option<String>> {
        let query = [
            ("format", "json".to_string()),
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
        ];
        let response: ReverseResponse = self.client.get_url(&self.url("reverse"), &query).await?;
        Ok(response.display_name)
    }

    /// Places in India matching `query`
    pub async fn search(&self, query: &str, limit: u32) -> ApiResult<Vec<SearchResult>> {
        let params = [
            ("format", "json".to_string()),
            ("q", query.to_string()),
            ("countrycodes", "in".to_string()),
            ("limit", limit.to_string()),
        ];
        self.client.get_url(&self.url("search"), &params).await
    }
}

/// Reverse lookup body; `display_name` is absent when there is no match
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    display_name: Option<String>,
}

/// One search hit. Nominatim sends coordinates as strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Nominatim place id
    pub place_id: u64,
    /// Full place name
    pub display_name: String,
    /// Latitude
    pub lat: String,
    /// Longitude
    pub lon: String,
}

impl SearchResult {
    /// Parsed coordinate, if both halves are numbers
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        let lat = self.lat.trim().parse().ok()?;
        let lon = self.lon.trim().parse().ok()?;
        Some(Coordinate::new(lat, lon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_results_parse() {
        let body = r#"[{
            "place_id": 282384126,
            "licence": "ODbL",
            "display_name": "India Gate, Kartavya Path, New Delhi, Delhi, India",
            "lat": "28.6129",
            "lon": "77.2295",
            "type": "memorial"
        }]"#;
        let results: Vec<SearchResult> = serde_json::from_str(body).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].coordinate(), Some(Coordinate::new(28.6129, 77.2295)));
    }

    #[test]
    fn test_unparsable_coordinate() {
        let result = SearchResult {
            place_id: 1,
            display_name: "x".into(),
            lat: "north".into(),
            lon: "77".into(),
        };
        assert_eq!(result.coordinate(), None);
    }

    #[test]
    fn test_reverse_without_match() {
        let response: ReverseResponse = serde_json::from_str(r#"{"error": "Unable to geocode"}"#).unwrap();
        assert!(response.display_name.is_none());
    }

    #[test]
    fn test_url_building() {
        let client = DigipinClient::with_config(
            crate::ClientConfig::default().with_geocoder_url("https://geo.example/"),
        )
        .unwrap();
        assert_eq!(client.geocoding().url("search"), "https://geo.example/search");
    }
}
