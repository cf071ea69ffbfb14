//! Shareable links

use super::{session_error, Context};
use anyhow::Result;
use clap::Args;
use digipin_cli::output::{format_coordinate, print_json};
use digipin_cli::Status;
use digipin_core::config::BASE_LAYER_KEYS;
use digipin_geo::{format_distance, GridCodec};
use digipin_state::{BaseLayer, Hydrated, MemoryLocationBar, QueryParams, Session, ShareableState};
use serde::Serialize;

#[derive(Args)]
pub struct ShareArgs {
    /// Read the state out of an existing link instead of building one
    #[arg(long, conflicts_with_all = ["tab", "enc_tab", "lat", "lng", "dec_pin", "geo_a", "geo_b", "base", "zoom"])]
    url: Option<String>,

    /// Active tab
    #[arg(long)]
    tab: Option<i64>,

    /// Active encode sub-tab
    #[arg(long)]
    enc_tab: Option<i64>,

    /// Latitude of the selected location (encoded into the link)
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude of the selected location
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lng: Option<f64>,

    /// Pin shown in the decode tab
    #[arg(long)]
    dec_pin: Option<String>,

    /// First pin of a distance comparison
    #[arg(long, requires = "geo_b")]
    geo_a: Option<String>,

    /// Second pin of a distance comparison
    #[arg(long, requires = "geo_a")]
    geo_b: Option<String>,

    /// Map base layer
    #[arg(long, value_parser = clap::builder::PossibleValuesParser::new(BASE_LAYER_KEYS))]
    base: Option<String>,

    /// Map zoom
    #[arg(long)]
    zoom: Option<i64>,

    /// Page the link points at (defaults to `share.base_url` from the config)
    #[arg(long)]
    base_url: Option<String>,
}

#[derive(Serialize)]
struct ShareOutput<'a> {
    url: String,
    state: &'a ShareableState,
    #[serde(skip_serializing_if = "Option::is_none")]
    rejected_location: Option<digipin_geo::Coordinate>,
}

pub fn run(ctx: &Context, args: &ShareArgs) -> Result<()> {
    let base_url = args.base_url.as_deref().unwrap_or(&ctx.config.schema.share.base_url);

    match &args.url {
        Some(url) => inspect(ctx, url, base_url),
        None => build(ctx, args, base_url),
    }
}

/// Replays the flags through a session so pins and distances are computed
/// and validated the same way the app does it
fn build(ctx: &Context, args: &ShareArgs, base_url: &str) -> Result<()> {
    let mut session = Session::start(MemoryLocationBar::new(""));

    if let Some(tab) = args.tab {
        session.set_tab(tab);
    }
    if let Some(tab) = args.enc_tab {
        session.set_enc_tab(tab);
    }
    if let Some(base) = args.base.as_deref().and_then(BaseLayer::from_key) {
        session.set_base_layer(base);
    }
    if let Some(zoom) = args.zoom {
        session.set_zoom(zoom);
    }
    if let (Some(lat), Some(lng)) = (args.lat, args.lng) {
        session
            .encode_location(&GridCodec, lat, lng)
            .map_err(session_error)?;
    }
    if let Some(pin) = &args.dec_pin {
        session.decode_pin(&GridCodec, pin).map_err(session_error)?;
    }
    if let (Some(pin_a), Some(pin_b)) = (&args.geo_a, &args.geo_b) {
        session.compare(&GridCodec, pin_a, pin_b).map_err(session_error)?;
    }

    let url = session.share_url(base_url);
    if ctx.is_json() {
        print_json(&ShareOutput { url, state: session.state(), rejected_location: None })?;
    } else {
        println!("{url}");
    }
    Ok(())
}

fn inspect(ctx: &Context, url: &str, base_url: &str) -> Result<()> {
    let query = url
        .split('#')
        .next()
        .and_then(|without_fragment| without_fragment.split_once('?'))
        .map_or("", |(_, query)| query);

    let hydrated = ShareableState::from_query(&QueryParams::parse(query));
    let canonical = hydrated.state.share_url(base_url);

    if ctx.is_json() {
        print_json(&ShareOutput {
            url: canonical,
            state: &hydrated.state,
            rejected_location: hydrated.rejected_location,
        })?;
        return Ok(());
    }

    render_state(ctx, &hydrated);
    println!();
    Status::field("Link", canonical);
    Ok(())
}

fn render_state(ctx: &Context, hydrated: &Hydrated) {
    let state = &hydrated.state;
    let general = &ctx.config.schema.general;

    Status::header("Shared state");
    if let Some(location) = hydrated.accepted_location() {
        Status::field("Location", format_coordinate(location.latitude, location.longitude));
    }
    if let Some(pin) = &state.enc_pin {
        Status::field("Encoded", pin);
    }
    if let Some(pin) = &state.dec_pin {
        Status::field("Decode", pin);
    }
    if let (Some(a), Some(b)) = (&state.geo_a, &state.geo_b) {
        Status::field("Compare", format!("{a} / {b}"));
    }
    if let Some(distance) = state.distance {
        Status::field("Distance", format_distance(distance));
    }
    Status::field("Tab", state.tab.unwrap_or(0));
    if let Some(tab) = state.enc_tab {
        Status::field("Encode tab", tab);
    }
    Status::field(
        "Base layer",
        state.base.map_or_else(|| general.default_base_layer.clone(), |b| b.to_string()),
    );
    Status::field("Zoom", state.zoom.unwrap_or(general.default_zoom));

    if let Some(rejected) = hydrated.rejected_location {
        Status::warning(&format!(
            "Ignored location {} outside India",
            format_coordinate(rejected.latitude, rejected.longitude)
        ));
    }
}
