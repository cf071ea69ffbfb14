//! Saved places

use super::{ensure_within_india, geo_error, storage_error, Context};
use anyhow::Result;
use digipin_cli::output::{format_count, format_coordinate, print_json};
use digipin_cli::Status;
use digipin_geo::{DigipinCodec, GridCodec};
use digipin_state::{FavoritesStore, FileStore};
use owo_colors::OwoColorize;
use std::path::Path;
use tracing::debug;

fn open(path: &Path) -> FavoritesStore<FileStore> {
    debug!(path = %path.display(), "Opening favorites");
    FavoritesStore::new(FileStore::new(path))
}

pub fn list(ctx: &Context, path: &Path) -> Result<()> {
    let items = open(path).load();

    if ctx.is_json() {
        print_json(&items)?;
        return Ok(());
    }

    if items.is_empty() {
        Status::info("No favorites yet. Save one with `digipin favorites add LAT LNG`");
        return Ok(());
    }

    Status::header(&format!("Favorites ({})", format_count(items.len(), "place", "places")));
    for item in &items {
        println!(
            "  {}  {}  {}  {}",
            item.id.dimmed(),
            item.pin.bold(),
            item.label,
            format_coordinate(item.lat, item.lng).dimmed()
        );
    }
    Ok(())
}

pub fn add(ctx: &Context, path: &Path, lat: f64, lng: f64, label: &str) -> Result<()> {
    ensure_within_india(lat, lng)?;
    let pin = GridCodec.encode(lat, lng).map_err(geo_error)?;

    let item = open(path).add(label, lat, lng, &pin).map_err(storage_error)?;

    if ctx.is_json() {
        print_json(&item)?;
    } else {
        Status::success(&format!("Saved {} as {} (id {})", item.pin, item.label, item.id));
    }
    Ok(())
}

pub fn remove(ctx: &Context, path: &Path, id: i64) -> Result<()> {
    let removed = open(path).remove(id).map_err(storage_error)?;

    if ctx.is_json() {
        print_json(&serde_json::json!({ "id": id, "removed": removed }))?;
        return Ok(());
    }

    if removed {
        Status::success(&format!("Removed favorite {id}"));
    } else {
        Status::warning(&format!("No favorite with id {id}"));
    }
    Ok(())
}
