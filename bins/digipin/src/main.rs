//! DIGIPIN CLI
//!
//! Encode, decode and compare DIGIPINs, build shareable links and keep a
//! local favorites list. Everything except `remote` and `geocode` runs offline.

use clap::{Parser, Subcommand};
use digipin_cli::OutputFormat;
use digipin_core::config::Config;
use digipin_core::error::{exit_codes, ErrorCode};
use digipin_telemetry::TelemetryConfig;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

use commands::{batch, convert, favorites, geocode, remote, share, Context};

/// India's digital address codes from the terminal
#[derive(Parser)]
#[command(name = "digipin")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Configuration file (defaults to .digipin.toml in the current directory)
    #[arg(short, long, global = true, env = "DIGIPIN_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a coordinate inside India
    Encode {
        /// Latitude in degrees
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in degrees
        #[arg(allow_hyphen_values = true)]
        lng: f64,
    },

    /// Decode a DIGIPIN to its cell centre
    Decode {
        /// DIGIPIN, with or without dashes
        pin: String,
    },

    /// Check a coordinate against the India geofence
    Validate {
        /// Latitude in degrees
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in degrees
        #[arg(allow_hyphen_values = true)]
        lng: f64,
    },

    /// Distance between two DIGIPINs
    Distance {
        /// First pin
        pin_a: String,
        /// Second pin
        pin_b: String,
    },

    /// Closest candidate to a reference pin
    Nearest {
        /// Reference pin
        pin: String,

        /// Comma separated candidate pins
        #[arg(long)]
        candidates: String,

        /// Show at most this many ranked candidates
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },

    /// Convert many coordinates or pins at once
    Batch {
        #[command(subcommand)]
        action: BatchAction,
    },

    /// Build or inspect a shareable link
    Share(share::ShareArgs),

    /// Manage saved places
    Favorites {
        /// Favorites file (defaults to the configured storage path)
        #[arg(long, global = true, env = "DIGIPIN_FAVORITES")]
        file: Option<PathBuf>,

        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// Use the assistant backend
    Remote {
        #[command(subcommand)]
        action: RemoteAction,
    },

    /// Look up places with the geocoder
    Geocode {
        #[command(subcommand)]
        action: GeocodeAction,
    },
}

#[derive(Subcommand)]
enum BatchAction {
    /// `lat,lng` per line to pins
    Encode {
        /// Input file (reads stdin when omitted)
        file: Option<PathBuf>,
    },
    /// One pin per line (or comma separated) to coordinates
    Decode {
        /// Input file (reads stdin when omitted)
        file: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List saved places, newest first
    List,
    /// Save a coordinate
    Add {
        /// Latitude in degrees
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in degrees
        #[arg(allow_hyphen_values = true)]
        lng: f64,
        /// Label (defaults to the pin)
        #[arg(short, long, default_value = "")]
        label: String,
    },
    /// Delete a saved place by id
    Remove {
        /// Id shown by `favorites list`
        id: i64,
    },
}

#[derive(Subcommand)]
enum RemoteAction {
    /// Encode through the backend
    Encode {
        /// Latitude in degrees
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in degrees
        #[arg(allow_hyphen_values = true)]
        lng: f64,
    },
    /// Decode through the backend
    Decode {
        /// DIGIPIN
        pin: String,
    },
    /// Distance through the backend
    Distance {
        /// First pin
        pin_a: String,
        /// Second pin
        pin_b: String,
    },
    /// Nearest candidate through the backend
    Nearest {
        /// Reference pin
        pin: String,
        /// Comma separated candidate pins
        #[arg(long)]
        candidates: String,
    },
    /// Ask the assistant a question
    Ask {
        /// Message for the assistant
        message: String,
        /// Extra JSON context sent with the message
        #[arg(long)]
        context: Option<String>,
    },
    /// Check that the backend is up
    Health,
}

#[derive(Subcommand)]
enum GeocodeAction {
    /// Place name for a coordinate
    Reverse {
        /// Latitude in degrees
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in degrees
        #[arg(allow_hyphen_values = true)]
        lng: f64,
    },
    /// Places in India matching a query
    Search {
        /// Free-text query
        query: String,
        /// Maximum results
        #[arg(short, long, default_value = "5")]
        limit: u32,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return report(&anyhow::Error::new(e), cli.format),
    };

    let mut telemetry = TelemetryConfig {
        log_level: config.schema.logging.level.clone(),
        show_target: config.schema.logging.show_target,
        json: false,
    };
    if cli.verbose {
        telemetry = telemetry.verbose();
    }
    if let Err(e) = digipin_telemetry::init_with_config(&telemetry) {
        eprintln!("{} {e}", "Warning:".yellow().bold());
    }

    let ctx = Context::new(cli.format, config);

    let result = match cli.command {
        Commands::Encode { lat, lng } => convert::encode(&ctx, lat, lng),
        Commands::Decode { pin } => convert::decode(&ctx, &pin),
        Commands::Validate { lat, lng } => convert::validate(&ctx, lat, lng),
        Commands::Distance { pin_a, pin_b } => convert::distance(&ctx, &pin_a, &pin_b),
        Commands::Nearest { pin, candidates, limit } => convert::nearest(&ctx, &pin, &candidates, limit),

        Commands::Batch { action } => match action {
            BatchAction::Encode { file } => batch::encode(&ctx, file.as_deref()),
            BatchAction::Decode { file } => batch::decode(&ctx, file.as_deref()),
        },

        Commands::Share(args) => share::run(&ctx, &args),

        Commands::Favorites { file, action } => {
            let path = file.unwrap_or_else(|| ctx.config.favorites_path());
            match action {
                FavoritesAction::List => favorites::list(&ctx, &path),
                FavoritesAction::Add { lat, lng, label } => favorites::add(&ctx, &path, lat, lng, &label),
                FavoritesAction::Remove { id } => favorites::remove(&ctx, &path, id),
            }
        }

        Commands::Remote { action } => match action {
            RemoteAction::Encode { lat, lng } => remote::encode(&ctx, lat, lng).await,
            RemoteAction::Decode { pin } => remote::decode(&ctx, &pin).await,
            RemoteAction::Distance { pin_a, pin_b } => remote::distance(&ctx, &pin_a, &pin_b).await,
            RemoteAction::Nearest { pin, candidates } => remote::nearest(&ctx, &pin, &candidates).await,
            RemoteAction::Ask { message, context } => remote::ask(&ctx, &message, context.as_deref()).await,
            RemoteAction::Health => remote::health(&ctx).await,
        },

        Commands::Geocode { action } => match action {
            GeocodeAction::Reverse { lat, lng } => geocode::reverse(&ctx, lat, lng).await,
            GeocodeAction::Search { query, limit } => geocode::search(&ctx, &query, limit).await,
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e, ctx.format),
    }
}

/// Prints the error and maps it to the exit code of its category. JSON
/// output gets the error as a report on stderr, leaving stdout to results.
fn report(error: &anyhow::Error, format: OutputFormat) -> ExitCode {
    let core = error.downcast_ref::<digipin_core::Error>();

    if format.is_json() {
        let report = match core {
            Some(e) => e.to_report(),
            None => digipin_core::Error::new(ErrorCode::Unknown, error.to_string()).to_report(),
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => eprintln!("{json}"),
            Err(_) => eprintln!("{} {error}", "Error:".red().bold()),
        }
    } else {
        eprintln!("{} {error}", "Error:".red().bold());
    }

    let code = core.map_or(exit_codes::FAILURE, digipin_core::Error::exit_code);
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
