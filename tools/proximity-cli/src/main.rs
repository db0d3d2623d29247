use anyhow::{bail, Context, Result};
use bus_watch_proximity::prelude::*;
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

mod output;
mod stops;

use output::{emit, load_config};
use stops::read_stops;

#[derive(Parser, Debug)]
#[command(
    name = "proximity-cli",
    author,
    version,
    about = "Distance, bearing and arrival estimates for bus-watch",
    long_about = "Runs the bus-watch proximity calculations from the command line.\n\n\
                  Points are given as \"LAT,LNG\" in decimal degrees. Results print as \
                  plain text, or as JSON with --json."
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// JSON config file overriding the default speed, radii and thresholds
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (show debug messages)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Great-circle distance between two points
    Distance {
        #[arg(value_parser = parse_point, allow_hyphen_values = true)]
        from: GeoPoint,
        #[arg(value_parser = parse_point, allow_hyphen_values = true)]
        to: GeoPoint,
        /// kilometers, meters or miles
        #[arg(short, long, default_value = "kilometers")]
        unit: DistanceUnit,
    },

    /// Initial compass bearing from one point toward another
    Bearing {
        #[arg(value_parser = parse_point, allow_hyphen_values = true)]
        from: GeoPoint,
        #[arg(value_parser = parse_point, allow_hyphen_values = true)]
        to: GeoPoint,
    },

    /// Arrival time and countdown at an average speed
    Eta {
        #[arg(value_parser = parse_point, allow_hyphen_values = true)]
        from: GeoPoint,
        #[arg(value_parser = parse_point, allow_hyphen_values = true)]
        to: GeoPoint,
        /// Average speed in km/h (defaults to the configured speed)
        #[arg(short, long)]
        speed: Option<f64>,
    },

    /// Delay label and classification
    Delay {
        #[arg(allow_negative_numbers = true)]
        minutes: i64,
        /// Minutes at which a delay is significant (defaults to the configured threshold)
        #[arg(short, long)]
        threshold: Option<i64>,
    },

    /// Occupancy percentage and level
    Occupancy { count: u32, capacity: u32 },

    /// Closest stops from a GeoJSON file of Point features
    NearestStop {
        #[arg(value_parser = parse_point, allow_hyphen_values = true)]
        at: GeoPoint,
        /// GeoJSON FeatureCollection of stops
        #[arg(short, long)]
        stops: PathBuf,
        /// Search radius in km (defaults to the configured stop radius)
        #[arg(short, long)]
        radius: Option<f64>,
        /// Return up to this many stops within the radius instead of only the nearest
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Full distance/bearing/arrival report toward a destination
    Report {
        #[arg(value_parser = parse_point, allow_hyphen_values = true)]
        from: GeoPoint,
        #[arg(value_parser = parse_point, allow_hyphen_values = true)]
        to: GeoPoint,
    },
}

#[derive(Serialize)]
struct DistanceOutput {
    from: GeoPoint,
    to: GeoPoint,
    unit: DistanceUnit,
    distance: f64,
}

#[derive(Serialize)]
struct EtaOutput {
    minutes: i64,
    eta: chrono::DateTime<Utc>,
    time_remaining: String,
}

#[derive(Serialize)]
struct DelayOutput {
    minutes: i64,
    classification: DelayClassification,
    message: String,
    significant: bool,
}

#[derive(Serialize)]
struct OccupancyOutput {
    percentage: u64,
    level: OccupancyLevel,
}

#[derive(Serialize)]
struct StopOutput {
    id: StopIdentifier,
    name: String,
    location: GeoPoint,
    distance_km: f64,
}

fn parse_point(s: &str) -> std::result::Result<GeoPoint, String> {
    let (lat, lng) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG but got {s:?}"))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("bad latitude {lat:?}: {e}"))?;
    let lng: f64 = lng.trim().parse().map_err(|e| format!("bad longitude {lng:?}: {e}"))?;
    GeoPoint::new(lat, lng).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    let config = load_config(args.config.as_deref())?;
    let now = Utc::now();

    match args.command {
        Command::Distance { from, to, unit } => {
            let d = distance(from, to, unit);
            emit(
                args.json,
                &DistanceOutput { from, to, unit, distance: d },
                format!("{d} {unit}"),
            )?;
        }

        Command::Bearing { from, to } => {
            let b = bearing(from, to);
            emit(args.json, &b, format!("{b:.1}°"))?;
        }

        Command::Eta { from, to, speed } => {
            let speed = speed.unwrap_or(config.average_speed_kmh);
            log::debug!("Average speed: {} km/h", speed);

            let minutes = eta_minutes(from, to, speed).context("Cannot estimate arrival")?;
            let eta = estimated_arrival(from, to, speed, now)?;
            let time_remaining = format_time_remaining(eta, now);
            let text = format!("{time_remaining} (ETA {})", eta.format("%H:%M UTC"));
            emit(args.json, &EtaOutput { minutes, eta, time_remaining }, text)?;
        }

        Command::Delay { minutes, threshold } => {
            let threshold = threshold.unwrap_or(config.delay_threshold_minutes);
            let out = DelayOutput {
                minutes,
                classification: DelayClassification::from_delay_minutes(minutes),
                message: delay_message(minutes),
                significant: is_significantly_delayed(minutes, threshold),
            };
            let text = format!("{} ({})", out.message, out.classification);
            emit(args.json, &out, text)?;
        }

        Command::Occupancy { count, capacity } => {
            let out = OccupancyOutput {
                percentage: occupancy_percentage(count, capacity)?,
                level: occupancy_level(count, capacity)?,
            };
            let text = format!("{}% ({})", out.percentage, out.level);
            emit(args.json, &out, text)?;
        }

        Command::NearestStop { at, stops, radius, limit } => {
            let radius = radius.unwrap_or(config.nearest_stop_radius_km);
            if !radius.is_finite() || radius <= 0.0 {
                bail!("Radius must be a positive number of kilometers, got {radius}");
            }

            log::info!("Stops: {}", stops.display());
            let index = StopIndex::from_stops(read_stops(&stops)?);
            log::info!("  Indexed {} stops", index.len());

            let matches: Vec<StopMatch> = match limit {
                Some(n) => index.stops_within(at, radius).into_iter().take(n).collect(),
                None => index.nearest_stop(at, radius).into_iter().collect(),
            };

            if matches.is_empty() {
                log::warn!("No stops within {} km of {}", radius, format_coordinates(at, 4));
            }

            let out: Vec<StopOutput> = matches
                .iter()
                .map(|m| StopOutput {
                    id: m.stop.id.clone(),
                    name: m.stop.name.clone(),
                    location: m.stop.location,
                    distance_km: m.distance_km(),
                })
                .collect();
            let text = out
                .iter()
                .map(|s| format!("{}  {}  {}", s.id, s.name, format_distance(s.distance_km * 1000.0)))
                .collect::<Vec<_>>()
                .join("\n");
            emit(args.json, &out, text)?;
        }

        Command::Report { from, to } => {
            let tracker = ProximityTracker::new(to, config)?;
            let report = tracker.report(from, now)?;
            let text = format!(
                "{}  heading {:.0}°  {}{}",
                format_distance(report.distance_km * 1000.0),
                report.bearing_deg,
                report.time_remaining,
                if report.at_destination { "  (at destination)" } else { "" }
            );
            emit(args.json, &report, text)?;
        }
    }

    Ok(())
}
