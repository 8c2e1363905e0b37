//! Fishcast CLI - fishing forecast in the terminal
//!
//! Fetches forecasted weather (and optionally sea level) data, scores it
//! with the fishing index model and prints:
//! - the surrounding moon phases
//! - one line per forecast hour
//! - an optional ASCII chart
//! - the top five hours re-sorted chronologically

mod render;

use anyhow::{Context, Result};
use chrono::Utc;
use chrono_tz::Tz;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fishcast_astro::MoonEphemeris;
use fishcast_config::AppConfig;
use fishcast_core::{top_n, ForecastRequest, Forecaster};
use fishcast_fmi::FmiClient;

/// Calculate a fishing forecast from weather and moon data
#[derive(Debug, Parser)]
#[command(name = "fishcast", version)]
struct Args {
    /// Timezone for displayed timestamps
    #[arg(short, long)]
    timezone: Option<String>,

    /// Location in Finland
    #[arg(short, long)]
    location: Option<String>,

    /// Number of forecast hours
    #[arg(short = 'r', long)]
    hours: Option<u32>,

    /// Draw an ASCII chart of the index
    #[arg(short, long)]
    visualize: bool,

    /// Location for sea level measurement (enables sea level scoring)
    #[arg(short, long)]
    sealevel: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Plain log lines; this is an interactive tool
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;

    let timezone_name = args.timezone.unwrap_or_else(|| config.timezone());
    let timezone: Tz = timezone_name
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid timezone {timezone_name:?}: {e}"))?;
    let location = args.location.unwrap_or_else(|| config.location());
    let hours = args.hours.unwrap_or_else(|| config.hours());
    let sealevel = args.sealevel.or_else(|| config.sealevel());

    let forecaster = Forecaster::new(Box::new(FmiClient::new()), Box::new(MoonEphemeris::new()));

    let mut request = ForecastRequest::new(timezone, location.clone(), hours);
    if let Some(place) = sealevel.clone() {
        request = request.with_sea_level(place);
    }

    let scored = match forecaster.score_forecast(&request).await {
        Ok(scored) => {
            tracing::debug!(records = scored.len(), %location, "scored forecast series");
            scored
        }
        Err(error) => {
            eprintln!("Error fetching forecast data: {error}");
            return Ok(());
        }
    };

    print_moon_phases(&forecaster, timezone);

    if scored.is_empty() {
        println!("\nNo forecast data found for {location}");
        return Ok(());
    }

    let sea_level_enabled = request.sea_level_enabled();

    let heading = format!("\nFishing forecast for {location} for next {hours} hours:");
    println!("{heading}");
    println!("{}", "-".repeat(heading.chars().count() - 1));
    for record in &scored {
        println!("{}", render::format_record(record, sea_level_enabled));
    }

    if args.visualize {
        println!("{}", render::ascii_chart(&scored));
    }

    let heading = format!("\nTop 5 best fishing hours in {location} in next {hours} hours:");
    println!("{heading}");
    println!("{}", "-".repeat(heading.chars().count() - 1));
    for record in top_n(&scored, 5) {
        println!("{}", render::format_record(&record, sea_level_enabled));
    }
    println!();

    Ok(())
}

fn print_moon_phases(forecaster: &Forecaster, timezone: Tz) {
    let window = forecaster.moon_window(Utc::now());
    let local = |instant: chrono::DateTime<Utc>| {
        instant
            .with_timezone(&timezone)
            .format("%Y-%m-%d %H:%M")
            .to_string()
    };

    let heading = "\nMoon phases:";
    println!("{heading}");
    println!("{}", "-".repeat(heading.chars().count() - 1));
    println!("Previous full moon:\t {}", local(window.prev_full));
    println!("Previous new moon:\t {}", local(window.prev_new));
    println!("Next full moon:\t\t {}", local(window.next_full));
    println!("Next new moon:\t\t {}", local(window.next_new));
}
