//! CLI entry point for the airwatch aggregation service.
//!
//! One subcommand per query operation; each prints the normalized domain
//! result as pretty JSON, or exits with the provider error.

use std::ffi::OsStr;
use std::path::Path;

use airwatch::config::Config;
use airwatch::domain::location::BoundingBox;
use airwatch::service::Aggregator;
use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::warn;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "airwatch")]
#[command(about = "Aggregates air-quality and weather data from upstream providers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Current air quality for a coordinate (primary provider with fallback)
    Current {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },
    /// Current weather conditions for a coordinate
    Weather {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },
    /// Monitoring stations inside a south/west/north/east bounding box
    Stations {
        #[arg(allow_negative_numbers = true)]
        south: f64,
        #[arg(allow_negative_numbers = true)]
        west: f64,
        #[arg(allow_negative_numbers = true)]
        north: f64,
        #[arg(allow_negative_numbers = true)]
        east: f64,
    },
    /// Daily weather forecast for the supported deployment location
    Forecast,
    /// Daily AQI predictions for the supported deployment location
    Predictions,
    /// Active advisory alerts for a coordinate
    Alerts {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,

        /// Override the location name used in alert text
        #[arg(short, long)]
        location_name: Option<String>,
    },
    /// Search cities by name prefix, most populous first
    SearchCity {
        query: String,

        #[arg(short, long, default_value_t = 10)]
        limit: u32,

        #[arg(short, long, default_value_t = 0)]
        offset: u32,
    },
    /// Nearest city to a coordinate
    ReverseCity {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,

        /// Search radius in kilometres
        #[arg(short, long, default_value_t = 50)]
        radius: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/airwatch.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("airwatch.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let config = Config::from_env();
    for provider in config.missing_providers() {
        warn!(provider = %provider, "provider not configured; dependent operations will fail");
    }
    let service = Aggregator::new(config);

    match cli.command {
        Commands::Current { lat, lon } => {
            print_json(&service.current_air_quality(lat, lon).await?)?;
        }
        Commands::Weather { lat, lon } => {
            print_json(&service.current_weather(lat, lon).await?)?;
        }
        Commands::Stations {
            south,
            west,
            north,
            east,
        } => {
            let bounds = BoundingBox {
                south,
                west,
                north,
                east,
            };
            print_json(&service.map_stations(bounds).await?)?;
        }
        Commands::Forecast => {
            print_json(&service.weather_forecast().await?)?;
        }
        Commands::Predictions => {
            print_json(&service.aqi_predictions().await?)?;
        }
        Commands::Alerts {
            lat,
            lon,
            location_name,
        } => {
            print_json(
                &service
                    .active_alerts(lat, lon, location_name.as_deref())
                    .await?,
            )?;
        }
        Commands::SearchCity {
            query,
            limit,
            offset,
        } => {
            print_json(&service.search_cities(&query, limit, offset).await?)?;
        }
        Commands::ReverseCity { lat, lon, radius } => {
            print_json(&service.city_by_coordinates(lat, lon, radius).await?)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
