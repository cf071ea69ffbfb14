//! Shareable links.
//!
//! The part of the application state that survives a copy-pasted URL lives in
//! [`ShareableState`]. Writing it into a query string sets every tracked key
//! that has a value and deletes the rest, leaving unrelated keys alone.
//! Reading is best-effort per field: anything malformed is skipped, and a
//! coordinate is only taken when both halves parse and pass the geofence.

use digipin_geo::{is_within_india_strict, Coordinate};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Query parameter names.
pub mod keys {
    #![allow(missing_docs)]
    pub const TAB: &str = "tab";
    pub const ENC_TAB: &str = "encTab";
    pub const ZOOM: &str = "zoom";
    pub const BASE: &str = "base";
    pub const LAT: &str = "lat";
    pub const LNG: &str = "lng";
    pub const ENC_PIN: &str = "encPin";
    pub const DEC_PIN: &str = "decPin";
    pub const GEO_A: &str = "geoA";
    pub const GEO_B: &str = "geoB";
    pub const DISTANCE: &str = "distance";

    /// Every key the state owns, in write order.
    pub const ALL: [&str; 11] = [
        TAB, ENC_TAB, ZOOM, BASE, LAT, LNG, ENC_PIN, DEC_PIN, GEO_A, GEO_B, DISTANCE,
    ];
}

/// Ordered `key=value` pairs of a URL query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `application/x-www-form-urlencoded` text, with or without a
    /// leading `?`. Never fails: undecodable escapes are kept verbatim.
    ///
    /// # Example
    /// ```
    /// use digipin_state::QueryParams;
    ///
    /// let params = QueryParams::parse("?decPin=39J-438-TJC7&q=new+delhi");
    /// assert_eq!(params.get("decPin"), Some("39J-438-TJC7"));
    /// assert_eq!(params.get("q"), Some("new delhi"));
    /// ```
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query
            .split('&')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
                (decode_component(key), decode_component(value))
            })
            .collect();

        Self { pairs }
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replaces the first `key` in place and drops any repeats; appends when
    /// the key is new.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter().position(|(k, _)| k == key) {
            Some(index) => {
                self.pairs[index].1 = value;
                let mut seen = 0usize;
                self.pairs.retain(|(k, _)| {
                    if k != key {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    /// Removes every occurrence of `key`.
    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    /// Pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// True when there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Percent-encoded query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Map base layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseLayer {
    /// OpenStreetMap
    #[serde(rename = "osm")]
    Osm,
    /// Carto light
    #[serde(rename = "cartoLight")]
    CartoLight,
    /// Carto dark
    #[serde(rename = "cartoDark")]
    CartoDark,
    /// Esri imagery
    #[serde(rename = "esri")]
    Esri,
}

impl BaseLayer {
    /// All layers in menu order.
    pub const ALL: [BaseLayer; 4] = [
        BaseLayer::Osm,
        BaseLayer::CartoLight,
        BaseLayer::CartoDark,
        BaseLayer::Esri,
    ];

    /// Key used in URLs and config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseLayer::Osm => "osm",
            BaseLayer::CartoLight => "cartoLight",
            BaseLayer::CartoDark => "cartoDark",
            BaseLayer::Esri => "esri",
        }
    }

    /// Looks a layer up by its exact key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|layer| layer.as_str() == key)
    }
}

impl fmt::Display for BaseLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application state carried in shareable links. `None` means "not in the
/// URL".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareableState {
    /// Active tab
    pub tab: Option<i64>,
    /// Active encode sub-tab
    pub enc_tab: Option<i64>,
    /// Selected location
    pub location: Option<Coordinate>,
    /// Last encoded pin
    pub enc_pin: Option<String>,
    /// Decode input
    pub dec_pin: Option<String>,
    /// First distance pin
    pub geo_a: Option<String>,
    /// Second distance pin
    pub geo_b: Option<String>,
    /// Last computed distance in meters
    pub distance: Option<f64>,
    /// Map base layer
    pub base: Option<BaseLayer>,
    /// Map zoom
    pub zoom: Option<i64>,
}

/// Result of reading state from a URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hydrated {
    /// Everything that was accepted
    pub state: ShareableState,
    /// A coordinate that parsed but failed the geofence
    pub rejected_location: Option<Coordinate>,
}

impl Hydrated {
    /// Coordinate taken from the URL, for the caller's reverse-geocoding lookup.
    pub fn accepted_location(&self) -> Option<Coordinate> {
        self.state.location
    }
}

impl ShareableState {
    /// Writes the tracked keys into a copy of `existing`.
    ///
    /// Keys with a value are set, keys without one are removed, and keys this
    /// state does not own are kept in their original order.
    pub fn write_query(&self, existing: &QueryParams) -> QueryParams {
        let mut params = existing.clone();
        let (lat, lng) = match self.location {
            Some(c) => (Some(c.latitude.to_string()), Some(c.longitude.to_string())),
            None => (None, None),
        };

        let values = [
            (keys::TAB, self.tab.map(|v| v.to_string())),
            (keys::ENC_TAB, self.enc_tab.map(|v| v.to_string())),
            (keys::ZOOM, self.zoom.map(|v| v.to_string())),
            (keys::BASE, self.base.map(|b| b.as_str().to_string())),
            (keys::LAT, lat),
            (keys::LNG, lng),
            (keys::ENC_PIN, self.enc_pin.clone()),
            (keys::DEC_PIN, self.dec_pin.clone()),
            (keys::GEO_A, self.geo_a.clone()),
            (keys::GEO_B, self.geo_b.clone()),
            (keys::DISTANCE, self.distance.map(|v| v.to_string())),
        ];

        for (key, value) in values {
            match value.filter(|v| !v.is_empty()) {
                Some(value) => params.set(key, value),
                None => params.remove(key),
            }
        }

        params
    }

    /// Reads state from URL parameters. Never fails.
    pub fn from_query(params: &QueryParams) -> Hydrated {
        let int = |key: &str| params.get(key).and_then(|v| v.trim().parse::<i64>().ok());
        let float = |key: &str| {
            params
                .get(key)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
        };
        let text = |key: &str| {
            params
                .get(key)
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let mut hydrated = Hydrated::default();
        let state = &mut hydrated.state;

        state.tab = int(keys::TAB);
        state.enc_tab = int(keys::ENC_TAB);
        state.zoom = int(keys::ZOOM);
        state.base = params.get(keys::BASE).and_then(BaseLayer::from_key);
        state.enc_pin = text(keys::ENC_PIN);
        state.dec_pin = text(keys::DEC_PIN);
        state.geo_a = text(keys::GEO_A);
        state.geo_b = text(keys::GEO_B);
        state.distance = float(keys::DISTANCE);

        if let (Some(lat), Some(lng)) = (float(keys::LAT), float(keys::LNG)) {
            if is_within_india_strict(lat, lng) {
                debug!(lat, lng, "accepted coordinate from URL");
                state.location = Some(Coordinate::new(lat, lng));
            } else {
                debug!(lat, lng, "ignored coordinate outside India from URL");
                hydrated.rejected_location = Some(Coordinate::new(lat, lng));
            }
        }

        hydrated
    }

    /// Full link to this state under `base_url`. Any query or fragment already
    /// on `base_url` is dropped.
    ///
    /// # Example
    /// ```
    /// use digipin_state::ShareableState;
    ///
    /// let state = ShareableState { dec_pin: Some("39J-438-TJC7".into()), ..Default::default() };
    /// assert_eq!(
    ///     state.share_url("https://example.org/app?old=1"),
    ///     "https://example.org/app?decPin=39J-438-TJC7"
    /// );
    /// ```
    pub fn share_url(&self, base_url: &str) -> String {
        let base = base_url.split(['?', '#']).next().unwrap_or(base_url);
        let query = self.write_query(&QueryParams::new()).to_query_string();
        if query.is_empty() {
            base.to_string()
        } else {
            format!("{base}?{query}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn representative() -> ShareableState {
        ShareableState {
            tab: Some(0),
            enc_tab: Some(1),
            location: Some(Coordinate::new(28.6139, 77.209)),
            enc_pin: Some("39J-438-TJC7".to_string()),
            base: Some(BaseLayer::CartoDark),
            zoom: Some(7),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_decodes_components() {
        let params = QueryParams::parse("a=1&b=hello%20world&c=x+y&flag&&d=%E0%A4%AD");
        assert_eq!(params.get("a"), Some("1"));
        assert_eq!(params.get("b"), Some("hello world"));
        assert_eq!(params.get("c"), Some("x y"));
        assert_eq!(params.get("flag"), Some(""));
        assert_eq!(params.get("d"), Some("भ"));
        assert_eq!(params.iter().count(), 5);
    }

    #[test]
    fn test_parse_keeps_bad_escapes() {
        let params = QueryParams::parse("a=%FF%FE");
        assert_eq!(params.get("a"), Some("%FF%FE"));
    }

    #[test]
    fn test_set_replaces_first_and_drops_repeats() {
        let mut params = QueryParams::parse("x=1&tab=2&y=3&tab=4");
        params.set("tab", "9");
        assert_eq!(params.to_query_string(), "x=1&tab=9&y=3");

        params.set("z", "new");
        assert_eq!(params.to_query_string(), "x=1&tab=9&y=3&z=new");
    }

    #[test]
    fn test_query_string_encodes_values() {
        let mut params = QueryParams::new();
        params.set("q", "a b&c");
        assert_eq!(params.to_string(), "q=a%20b%26c");
    }

    #[test]
    fn test_base_layer_keys() {
        for layer in BaseLayer::ALL {
            assert_eq!(BaseLayer::from_key(layer.as_str()), Some(layer));
        }
        assert_eq!(BaseLayer::from_key("satellite"), None);
        assert_eq!(BaseLayer::from_key("CartoDark"), None);
    }

    #[test]
    fn test_url_round_trip() {
        let state = representative();
        let query = state.write_query(&QueryParams::new()).to_query_string();
        assert_eq!(
            query,
            "tab=0&encTab=1&zoom=7&base=cartoDark&lat=28.6139&lng=77.209&encPin=39J-438-TJC7"
        );

        let hydrated = ShareableState::from_query(&QueryParams::parse(&query));
        assert_eq!(hydrated.state, state);
        assert_eq!(hydrated.accepted_location(), Some(Coordinate::new(28.6139, 77.209)));
    }

    #[test]
    fn test_round_trip_with_every_field() {
        let state = ShareableState {
            dec_pin: Some("4FK-595-8823".to_string()),
            geo_a: Some("39J-438-TJC7".to_string()),
            geo_b: Some("4FK-595-8823".to_string()),
            distance: Some(1_148_096.123),
            base: Some(BaseLayer::Osm),
            ..representative()
        };
        let query = state.write_query(&QueryParams::new());
        assert_eq!(ShareableState::from_query(&query).state, state);
    }

    #[test]
    fn test_write_preserves_unknown_keys_and_deletes_absent() {
        let existing = QueryParams::parse("utm=mail&decPin=OLD&tab=3");
        let state = ShareableState {
            tab: Some(1),
            ..Default::default()
        };
        assert_eq!(state.write_query(&existing).to_query_string(), "utm=mail&tab=1");
    }

    #[test]
    fn test_empty_strings_count_as_absent() {
        let state = ShareableState {
            enc_pin: Some(String::new()),
            ..Default::default()
        };
        assert!(state.write_query(&QueryParams::parse("encPin=X")).is_empty());
        assert_eq!(ShareableState::from_query(&QueryParams::parse("decPin=")).state.dec_pin, None);
    }

    #[test]
    fn test_malformed_coordinate_is_ignored() {
        let hydrated = ShareableState::from_query(&QueryParams::parse("lat=notanumber&lng=77.2&zoom=9"));
        assert_eq!(hydrated.state.location, None);
        assert_eq!(hydrated.rejected_location, None);
        assert_eq!(hydrated.state.zoom, Some(9));
    }

    #[test]
    fn test_half_a_coordinate_is_ignored() {
        let hydrated = ShareableState::from_query(&QueryParams::parse("lat=28.6"));
        assert_eq!(hydrated.state.location, None);
    }

    #[test]
    fn test_coordinate_outside_india_rejected_on_load() {
        let hydrated = ShareableState::from_query(&QueryParams::parse("lat=40&lng=80"));
        assert_eq!(hydrated.state.location, None);
        assert_eq!(hydrated.accepted_location(), None);
        assert_eq!(hydrated.rejected_location, Some(Coordinate::new(40.0, 80.0)));
    }

    #[test]
    fn test_nan_coordinate_rejected_on_load() {
        let hydrated = ShareableState::from_query(&QueryParams::parse("lat=NaN&lng=77.2"));
        assert_eq!(hydrated.state.location, None);
    }

    #[test]
    fn test_bad_fields_degrade_one_by_one() {
        let hydrated = ShareableState::from_query(&QueryParams::parse(
            "tab=two&encTab=1&zoom=7.5&base=satellite&distance=far&geoA=39J-438-TJC7",
        ));
        let state = hydrated.state;
        assert_eq!(state.tab, None);
        assert_eq!(state.enc_tab, Some(1));
        assert_eq!(state.zoom, None);
        assert_eq!(state.base, None);
        assert_eq!(state.distance, None);
        assert_eq!(state.geo_a.as_deref(), Some("39J-438-TJC7"));
    }

    #[test]
    fn test_share_url() {
        let url = representative().share_url("https://digipin.example/#map");
        assert!(url.starts_with("https://digipin.example/?tab=0&encTab=1"));
        assert_eq!(ShareableState::default().share_url("https://digipin.example/"), "https://digipin.example/");
    }

    proptest! {
        #[test]
        fn prop_text_fields_survive_the_url(pin in "\\PC{1,40}", tab in any::<i64>()) {
            let state = ShareableState {
                tab: Some(tab),
                dec_pin: Some(pin),
                ..Default::default()
            };
            let query = state.write_query(&QueryParams::new()).to_query_string();
            let hydrated = ShareableState::from_query(&QueryParams::parse(&query));
            prop_assert_eq!(hydrated.state, state);
        }
    }
}
