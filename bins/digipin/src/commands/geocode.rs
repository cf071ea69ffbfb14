//! Place lookups through the geocoder

use super::remote::{call, client};
use super::Context;
use anyhow::Result;
use digipin_cli::output::{format_coordinate, format_count, print_json};
use digipin_cli::Status;
use digipin_geo::{is_within_india_strict, DigipinCodec, GridCodec};
use owo_colors::OwoColorize;
use serde::Serialize;

#[derive(Serialize)]
struct Place {
    name: String,
    latitude: f64,
    longitude: f64,
    /// Only set inside India
    #[serde(skip_serializing_if = "Option::is_none")]
    pin: Option<String>,
}

fn local_pin(lat: f64, lng: f64) -> Option<String> {
    if is_within_india_strict(lat, lng) {
        GridCodec.encode(lat, lng).ok()
    } else {
        None
    }
}

pub async fn reverse(ctx: &Context, lat: f64, lng: f64) -> Result<()> {
    let client = client()?;
    let name = call(ctx, "Looking up place...", client.geocoding().reverse(lat, lng)).await?;
    let pin = local_pin(lat, lng);

    if ctx.is_json() {
        print_json(&serde_json::json!({
            "latitude": lat,
            "longitude": lng,
            "name": name,
            "pin": pin,
        }))?;
        return Ok(());
    }

    match name {
        Some(name) => Status::field("Place", name),
        None => Status::warning("No place found at this location"),
    }
    if let Some(pin) = pin {
        Status::field("DIGIPIN", pin);
    }
    Ok(())
}

pub async fn search(ctx: &Context, query: &str, limit: u32) -> Result<()> {
    let client = client()?;
    let results = call(ctx, "Searching...", client.geocoding().search(query, limit)).await?;

    let places: Vec<Place> = results
        .into_iter()
        .filter_map(|result| {
            let coordinate = result.coordinate()?;
            Some(Place {
                pin: local_pin(coordinate.latitude, coordinate.longitude),
                name: result.display_name,
                latitude: coordinate.latitude,
                longitude: coordinate.longitude,
            })
        })
        .collect();

    if ctx.is_json() {
        print_json(&places)?;
        return Ok(());
    }

    if places.is_empty() {
        Status::info(&format!("Nothing found for \"{query}\""));
        return Ok(());
    }

    Status::header(&format_count(places.len(), "result", "results"));
    for place in &places {
        println!("  {}", place.name.bold());
        println!(
            "    {}  {}",
            format_coordinate(place.latitude, place.longitude).dimmed(),
            place.pin.as_deref().unwrap_or("outside India")
        );
    }
    Ok(())
}
