//! Commands backed by the assistant backend

use super::{ensure_within_india, Context};
use anyhow::Result;
use digipin_api_client::{ApiResult, DigipinClient};
use digipin_cli::output::{format_coordinate, format_duration, print_json};
use digipin_cli::progress::spinner;
use digipin_cli::Status;
use digipin_geo::batch::parse_pin_list;
use indicatif::ProgressBar;
use owo_colors::OwoColorize;
use std::future::Future;

/// Client configured from the environment
pub fn client() -> Result<DigipinClient> {
    Ok(DigipinClient::new().map_err(digipin_core::Error::from)?)
}

/// Awaits `request` behind a spinner, converting failures to toolkit errors
pub async fn call<T>(ctx: &Context, message: &str, request: impl Future<Output = ApiResult<T>>) -> Result<T> {
    let pb = if ctx.is_json() || !console::user_attended_stderr() {
        ProgressBar::hidden()
    } else {
        spinner(message)
    };
    let result = request.await;
    pb.finish_and_clear();
    Ok(result.map_err(digipin_core::Error::from)?)
}

pub async fn encode(ctx: &Context, lat: f64, lng: f64) -> Result<()> {
    ensure_within_india(lat, lng)?;
    let client = client()?;
    let response = call(ctx, "Encoding...", client.digipin().encode(lat, lng)).await?;

    if ctx.is_json() {
        print_json(&response)?;
        return Ok(());
    }
    Status::field("DIGIPIN", &response.pin);
    Ok(())
}

pub async fn decode(ctx: &Context, pin: &str) -> Result<()> {
    let client = client()?;
    let response = call(ctx, "Decoding...", client.digipin().decode(pin)).await?;

    if ctx.is_json() {
        print_json(&response)?;
        return Ok(());
    }
    Status::field("Location", format_coordinate(response.latitude, response.longitude));
    if let Some(bounds) = &response.bounds {
        Status::field(
            "Cell",
            format!(
                "{} to {}",
                format_coordinate(bounds.south_west.lat, bounds.south_west.lon),
                format_coordinate(bounds.north_east.lat, bounds.north_east.lon)
            ),
        );
    }
    Ok(())
}

pub async fn distance(ctx: &Context, pin_a: &str, pin_b: &str) -> Result<()> {
    let client = client()?;
    let response = call(ctx, "Measuring...", client.digipin().distance(pin_a, pin_b)).await?;

    if ctx.is_json() {
        print_json(&response)?;
        return Ok(());
    }
    Status::field("Distance", response.display());
    Ok(())
}

pub async fn nearest(ctx: &Context, pin: &str, candidates: &str) -> Result<()> {
    let candidates = parse_pin_list(candidates);
    if candidates.is_empty() {
        return Err(digipin_core::Error::new(digipin_core::ErrorCode::NoCandidates, "No DIGIPIN candidates supplied")
            .with_suggestion("Pass at least one pin with --candidates")
            .into());
    }

    let client = client()?;
    let response = call(ctx, "Searching...", client.digipin().nearest(pin, &candidates)).await?;

    if ctx.is_json() {
        print_json(&response)?;
        return Ok(());
    }
    Status::field("Nearest", &response.nearest);
    Ok(())
}

pub async fn ask(ctx: &Context, message: &str, context: Option<&str>) -> Result<()> {
    let context = context
        .map(serde_json::from_str::<serde_json::Value>)
        .transpose()
        .map_err(|e| {
            digipin_core::Error::new(digipin_core::ErrorCode::InvalidFormat, "--context is not valid JSON").with_source(e)
        })?;

    let client = client()?;
    let response = call(ctx, "Thinking...", client.agent().respond(message, context)).await?;

    if ctx.is_json() {
        print_json(&response)?;
        return Ok(());
    }
    println!("{}", response.response);
    Ok(())
}

pub async fn health(ctx: &Context) -> Result<()> {
    let client = client()?;
    let (response, elapsed) = call(ctx, "Checking backend...", client.health().check_timed()).await?;

    if ctx.is_json() {
        print_json(&serde_json::json!({
            "url": client.base_url(),
            "status": response.status,
            "agent_ready": response.agent_ready,
            "elapsed_ms": elapsed.as_millis(),
        }))?;
    } else {
        Status::field("Backend", client.base_url());
        if response.is_ok() {
            Status::field("Status", response.status.green());
        } else {
            Status::field("Status", response.status.red());
        }
        Status::field("Assistant", if response.agent_ready { "ready" } else { "not ready" });
        Status::field("Latency", format_duration(elapsed).dimmed());
    }

    if response.is_ok() {
        Ok(())
    } else {
        Err(digipin_core::Error::remote(format!("Backend reports status `{}`", response.status)).into())
    }
}
