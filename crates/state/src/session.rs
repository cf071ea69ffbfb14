//! Application session.
//!
//! A [`Session`] owns the shareable state and the address bar. It reads the
//! URL once when started, and every mutation ends with [`Session::sync`],
//! which writes the state back with replace semantics.

use crate::location::LocationBar;
use crate::share::{BaseLayer, Hydrated, QueryParams, ShareableState};
use digipin_geo::{is_within_india_strict, Coordinate, DigipinCodec, GeoBounds, GeoError, INDIA_BOUNDS};
use thiserror::Error;
use tracing::debug;

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Coordinate rejected by the India geofence
    #[error("Coordinate ({latitude}, {longitude}) is outside India. Valid bounding box: {bounds}")]
    OutsideIndia {
        /// Latitude in degrees
        latitude: f64,
        /// Longitude in degrees
        longitude: f64,
        /// Bounding box of the geofence
        bounds: GeoBounds,
    },

    /// The codec failed
    #[error(transparent)]
    Codec(#[from] GeoError),
}

impl SessionError {
    fn outside_india(coordinate: Coordinate) -> Self {
        Self::OutsideIndia {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            bounds: INDIA_BOUNDS,
        }
    }
}

/// Single owner of the shareable state.
#[derive(Debug)]
pub struct Session<L: LocationBar> {
    state: ShareableState,
    bar: L,
    hydrated: Hydrated,
}

impl<L: LocationBar> Session<L> {
    /// Reads state from the bar's query string, then writes it back so that
    /// anything rejected on load disappears from the URL.
    pub fn start(bar: L) -> Self {
        let hydrated = ShareableState::from_query(&QueryParams::parse(&bar.query()));
        let mut session = Self {
            state: hydrated.state.clone(),
            bar,
            hydrated,
        };
        session.sync();
        session
    }

    /// Current state.
    pub fn state(&self) -> &ShareableState {
        &self.state
    }

    /// What was read from the URL at start.
    pub fn hydrated(&self) -> &Hydrated {
        &self.hydrated
    }

    /// The address bar.
    pub fn bar(&self) -> &L {
        &self.bar
    }

    /// Gives the address bar back.
    pub fn into_bar(self) -> L {
        self.bar
    }

    /// Encodes a location after checking the geofence. On success the
    /// location and pin are stored and any previous distance is cleared.
    pub fn encode_location<C: DigipinCodec + ?Sized>(
        &mut self,
        codec: &C,
        lat: f64,
        lng: f64,
    ) -> Result<String, SessionError> {
        let coordinate = Coordinate::new(lat, lng);
        if !is_within_india_strict(lat, lng) {
            debug!(lat, lng, "rejected coordinate outside India");
            return Err(SessionError::outside_india(coordinate));
        }

        let pin = codec.encode(lat, lng)?;
        self.state.location = Some(coordinate);
        self.state.enc_pin = Some(pin.clone());
        self.state.distance = None;
        self.sync();
        Ok(pin)
    }

    /// Decodes a pin. The input is kept as the decode field even when
    /// decoding fails; the centre must lie inside India.
    pub fn decode_pin<C: DigipinCodec + ?Sized>(&mut self, codec: &C, pin: &str) -> Result<Coordinate, SessionError> {
        self.state.dec_pin = Some(pin.trim().to_string());
        self.sync();

        let centre = codec.decode(pin)?;
        if !is_within_india_strict(centre.latitude, centre.longitude) {
            return Err(SessionError::outside_india(centre));
        }
        Ok(centre)
    }

    /// Distance in meters between two pins. Both pins are kept; the distance
    /// is cleared when it cannot be computed.
    pub fn compare<C: DigipinCodec + ?Sized>(&mut self, codec: &C, pin_a: &str, pin_b: &str) -> Result<f64, SessionError> {
        self.state.geo_a = Some(pin_a.trim().to_string());
        self.state.geo_b = Some(pin_b.trim().to_string());

        let result = codec.distance(pin_a, pin_b);
        self.state.distance = result.as_ref().ok().copied();
        self.sync();

        Ok(result?)
    }

    /// Selects a tab.
    pub fn set_tab(&mut self, tab: i64) {
        self.state.tab = Some(tab);
        self.sync();
    }

    /// Selects an encode sub-tab.
    pub fn set_enc_tab(&mut self, tab: i64) {
        self.state.enc_tab = Some(tab);
        self.sync();
    }

    /// Switches the base layer.
    pub fn set_base_layer(&mut self, base: BaseLayer) {
        self.state.base = Some(base);
        self.sync();
    }

    /// Sets the map zoom.
    pub fn set_zoom(&mut self, zoom: i64) {
        self.state.zoom = Some(zoom);
        self.sync();
    }

    /// Forgets the selected location and its pin.
    pub fn clear_location(&mut self) {
        self.state.location = None;
        self.state.enc_pin = None;
        self.sync();
    }

    /// Writes the state into the address bar. Returns false when the query
    /// string was already up to date and nothing was written.
    pub fn sync(&mut self) -> bool {
        let current = QueryParams::parse(&self.bar.query());
        let next = self.state.write_query(&current).to_query_string();

        if next == current.to_query_string() {
            return false;
        }

        debug!(query = %next, "syncing URL");
        self.bar.replace_query(&next);
        true
    }

    /// Link reproducing this session under `base_url`.
    pub fn share_url(&self, base_url: &str) -> String {
        self.state.share_url(base_url)
    }
}
