//! Offline conversions: encode, decode, validate, distance, nearest

use super::{ensure_within_india, geo_error, Context};
use anyhow::Result;
use digipin_cli::output::{format_coordinate, print_json};
use digipin_cli::Status;
use digipin_geo::batch::{parse_pin_list, rank_by_distance, RankedPin};
use digipin_geo::{format_distance, geofence, pin, DigipinCodec, DistanceSummary, GeoBounds, GridCodec};
use owo_colors::OwoColorize;
use serde::Serialize;

#[derive(Serialize)]
struct EncodeOutput {
    latitude: f64,
    longitude: f64,
    pin: String,
}

#[derive(Serialize)]
struct DecodeOutput {
    pin: String,
    latitude: f64,
    longitude: f64,
    bounds: GeoBounds,
}

#[derive(Serialize)]
struct ValidateOutput {
    latitude: f64,
    longitude: f64,
    within_india: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    rejection: Option<geofence::Rejection>,
}

#[derive(Serialize)]
struct DistanceOutput<'a> {
    pin_a: &'a str,
    pin_b: &'a str,
    #[serde(flatten)]
    distance: DistanceSummary,
}

#[derive(Serialize)]
struct NearestOutput<'a> {
    reference: &'a str,
    nearest: String,
    ranking: Vec<RankedPin>,
}

/// Encode a coordinate that passes the geofence
pub fn encode(ctx: &Context, lat: f64, lng: f64) -> Result<()> {
    ensure_within_india(lat, lng)?;
    let pin = GridCodec.encode(lat, lng).map_err(geo_error)?;

    if ctx.is_json() {
        print_json(&EncodeOutput { latitude: lat, longitude: lng, pin })?;
        return Ok(());
    }

    Status::field("DIGIPIN", &pin);
    Status::field("Location", format_coordinate(lat, lng));
    Ok(())
}

/// Decode a pin; its cell centre must lie inside India
pub fn decode(ctx: &Context, input: &str) -> Result<()> {
    let decoded = pin::decode(input).map_err(geo_error)?;
    let centre = decoded.center;
    ensure_within_india(centre.latitude, centre.longitude)?;
    let canonical = pin::canonical(input).map_err(geo_error)?;

    if ctx.is_json() {
        print_json(&DecodeOutput {
            pin: canonical,
            latitude: centre.latitude,
            longitude: centre.longitude,
            bounds: decoded.bounds,
        })?;
        return Ok(());
    }

    Status::field("DIGIPIN", &canonical);
    Status::field("Location", format_coordinate(centre.latitude, centre.longitude));
    Status::field(
        "Cell",
        format!(
            "{} to {}",
            format_coordinate(decoded.bounds.south_west.latitude, decoded.bounds.south_west.longitude),
            format_coordinate(decoded.bounds.north_east.latitude, decoded.bounds.north_east.longitude)
        ),
    );
    Ok(())
}

/// Report whether a coordinate is inside India. A rejected coordinate exits
/// with the validation code.
pub fn validate(ctx: &Context, lat: f64, lng: f64) -> Result<()> {
    let rejection = geofence::check(lat, lng).err();

    if ctx.is_json() {
        print_json(&ValidateOutput {
            latitude: lat,
            longitude: lng,
            within_india: rejection.is_none() && lat.is_finite() && lng.is_finite(),
            rejection,
        })?;
    } else if rejection.is_none() && lat.is_finite() && lng.is_finite() {
        Status::success(&format!("{} is inside India", format_coordinate(lat, lng)));
    }

    ensure_within_india(lat, lng)?;
    Ok(())
}

/// Distance between two cell centres
pub fn distance(ctx: &Context, pin_a: &str, pin_b: &str) -> Result<()> {
    let summary = DistanceSummary::between(&GridCodec, pin_a, pin_b).map_err(geo_error)?;

    if ctx.is_json() {
        print_json(&DistanceOutput { pin_a, pin_b, distance: summary })?;
        return Ok(());
    }

    Status::field("Distance", &summary.formatted);
    Status::field("Meters", format!("{:.0}", summary.meters));
    Ok(())
}

/// Closest candidate, followed by the ranking it came from
pub fn nearest(ctx: &Context, reference: &str, candidates: &str, limit: usize) -> Result<()> {
    let candidates = parse_pin_list(candidates);
    let nearest = GridCodec.nearest(reference, &candidates).map_err(geo_error)?;
    let ranking = rank_by_distance(reference, &candidates, Some(limit)).map_err(geo_error)?;

    if ctx.is_json() {
        print_json(&NearestOutput { reference, nearest, ranking })?;
        return Ok(());
    }

    Status::field("Nearest", &nearest);
    if ranking.len() > 1 {
        Status::header("Ranking");
        for (index, ranked) in ranking.iter().enumerate() {
            println!(
                "  {:>2}. {}  {}",
                index + 1,
                ranked.pin,
                format_distance(ranked.distance).dimmed()
            );
        }
    }
    Ok(())
}
