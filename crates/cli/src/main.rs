use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use roam_core::itinerary::to_plain_text;
use roam_core::{
    classify, render_itinerary, ItineraryRequest, LocationList, SafetyReport, SafetyRequest,
    TripItinerary, TripRequest,
};
use roam_gateway::{
    AdvisorySource, GatewayConfig, LocationExtractor, TripGenerator, Upstream, UpstreamMode,
};
use roam_observability::init_tracing;

#[derive(Debug, Parser)]
#[command(name = "roam")]
#[command(about = "Roam itinerary planner CLI")]
struct Cli {
    /// Answer from the built-in fixture data instead of the live services.
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify itinerary lines into segments.
    Classify { file: Option<PathBuf> },
    /// Render an itinerary into display blocks.
    Render {
        file: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Generate a new itinerary.
    Plan {
        #[arg(long)]
        destination: String,
        #[arg(long)]
        days: i64,
        #[arg(long)]
        budget: String,
        #[arg(long, default_value = "")]
        interests: String,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Extract mappable locations from an itinerary.
    Locations { file: Option<PathBuf> },
    /// Look up the travel advisory for a country code.
    Safety { country_code: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("roam_cli");
    let cli = Cli::parse();

    match cli.command {
        Command::Classify { file } => {
            let text = read_input(file.as_ref())?;
            println!("{}", serde_json::to_string_pretty(&classify(&text))?);
        }
        Command::Render { file, format } => {
            let text = read_input(file.as_ref())?;
            print_blocks(&text, format)?;
        }
        Command::Plan {
            destination,
            days,
            budget,
            interests,
            format,
        } => {
            let request = TripRequest {
                destination,
                duration: days,
                budget,
                interests,
            }
            .validate()?;

            let upstream = build_upstream(cli.offline)?;
            let itinerary = upstream.generate_itinerary(&request).await?;
            match format {
                Format::Text => print_blocks(&itinerary, Format::Text)?,
                Format::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&TripItinerary { itinerary })?
                ),
            }
        }
        Command::Locations { file } => {
            let request = ItineraryRequest {
                itinerary: read_input(file.as_ref())?,
            }
            .validate()?;

            let upstream = build_upstream(cli.offline)?;
            let locations = upstream.extract_locations(&request.itinerary).await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&LocationList { locations })?
            );
        }
        Command::Safety { country_code } => {
            let request = SafetyRequest { country_code }.validate()?;

            let upstream = build_upstream(cli.offline)?;
            let record = upstream.country_advisory(&request.country_code).await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&SafetyReport::from(record))?
            );
        }
    }

    Ok(())
}

fn print_blocks(text: &str, format: Format) -> Result<()> {
    let blocks = render_itinerary(text);
    match format {
        Format::Text => println!("{}", to_plain_text(&blocks)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&blocks)?),
    }
    Ok(())
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed reading {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed reading itinerary from stdin")?;
            Ok(buffer)
        }
    }
}

fn build_upstream(offline: bool) -> Result<Upstream> {
    let mut config = GatewayConfig::from_env();
    if offline {
        config.mode = UpstreamMode::Fixture;
    }
    Upstream::from_config(config).context("failed to initialise upstream gateway")
}
