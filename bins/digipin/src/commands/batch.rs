//! Batch conversion of files or stdin

use super::Context;
use anyhow::{Context as _, Result};
use digipin_cli::output::{format_count, format_duration, print_json};
use digipin_cli::progress::{batch_progress, finish_error, finish_success};
use digipin_cli::Status;
use digipin_geo::batch::{self, BatchInput, BatchRow};
use digipin_telemetry::Timer;
use indicatif::ProgressBar;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::Read;
use std::path::Path;

/// Lines converted between progress updates
const CHUNK_SIZE: usize = 1000;

#[derive(Serialize)]
struct BatchOutput {
    total: usize,
    failed: usize,
    rows: Vec<BatchRow>,
}

/// Encode every `lat,lng` line
pub fn encode(ctx: &Context, file: Option<&Path>) -> Result<()> {
    let input = read_input(file)?;
    let coordinates = input.coordinates();
    let skipped = input.entries.len() - coordinates.len();
    if skipped > 0 {
        Status::warning(&format!(
            "Skipping {} that {} not look like coordinates",
            format_count(skipped, "line", "lines"),
            if skipped == 1 { "does" } else { "do" }
        ));
    }

    let rows = convert(ctx, "Encoding", &coordinates, batch::encode_rows);
    render(ctx, rows)
}

/// Decode every pin line
pub fn decode(ctx: &Context, file: Option<&Path>) -> Result<()> {
    let input = read_input(file)?;
    let pin_lines = input.pins();
    let skipped = input.entries.len() - pin_lines.len();
    // Comma separated pins on one line count as separate entries
    let pins: Vec<(usize, String)> = pin_lines
        .into_iter()
        .flat_map(|(line, text)| batch::parse_pin_list(&text).into_iter().map(move |pin| (line, pin)))
        .collect();

    if skipped > 0 {
        Status::warning(&format!(
            "Skipping {} with coordinates; use `batch encode` for those",
            format_count(skipped, "line", "lines")
        ));
    }

    let rows = convert(ctx, "Decoding", &pins, batch::decode_rows);
    render(ctx, rows)
}

fn read_input(file: Option<&Path>) -> Result<BatchInput> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| digipin_core::Error::file_not_found(path).with_source(e))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read batch input from stdin")?;
            text
        }
    };

    let input = batch::parse_batch_input(&text);
    if input.is_empty() {
        return Err(digipin_core::Error::validation("Batch input is empty")
            .with_suggestion("Provide one coordinate or DIGIPIN per line")
            .into());
    }
    Ok(input)
}

/// Runs `rows_for` chunk by chunk so the progress bar can advance
fn convert<T>(ctx: &Context, label: &str, entries: &[T], rows_for: fn(&[T]) -> Vec<BatchRow>) -> Vec<BatchRow> {
    let timer = Timer::start(format!("batch {}", label.to_lowercase()));
    let pb = if ctx.is_json() || !console::user_attended_stderr() {
        ProgressBar::hidden()
    } else {
        batch_progress(entries.len() as u64, label)
    };

    let mut rows = Vec::with_capacity(entries.len());
    for chunk in entries.chunks(CHUNK_SIZE) {
        rows.extend(rows_for(chunk));
        pb.inc(chunk.len() as u64);
    }

    let elapsed = timer.stop();
    let failed = rows.iter().filter(|row| !row.is_ok()).count();
    let summary = format!("{} in {}", format_count(rows.len(), "line", "lines"), format_duration(elapsed));
    if failed == 0 {
        finish_success(&pb, &summary);
    } else {
        finish_error(&pb, &summary);
    }
    rows
}

fn render(ctx: &Context, rows: Vec<BatchRow>) -> Result<()> {
    let failed = rows.iter().filter(|row| !row.is_ok()).count();

    if ctx.is_json() {
        print_json(&BatchOutput { total: rows.len(), failed, rows })?;
        return Ok(());
    }

    for row in &rows {
        match (&row.output, &row.error) {
            (Some(output), _) => println!("{:>5}  {}  {}", row.line.dimmed(), row.input, output.green()),
            (None, Some(error)) => println!("{:>5}  {}  {}", row.line.dimmed(), row.input, error.red()),
            (None, None) => {}
        }
    }

    println!();
    let converted = rows.len() - failed;
    if failed == 0 {
        Status::success(&format!("Converted {}", format_count(converted, "line", "lines")));
    } else {
        Status::warning(&format!(
            "Converted {}, {} failed",
            format_count(converted, "line", "lines"),
            failed
        ));
    }
    Ok(())
}
