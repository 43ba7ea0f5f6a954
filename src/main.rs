//! Batch CLI for the school-safety accessibility pipelines
//!
//! Each subcommand is a one-shot job: read GeoJSON inputs, compute, write
//! GeoJSON outputs, exit.

use clap::{Parser, Subcommand};
use log::error;

mod commands;

use commands::{coverage, isochrones, proximity, reproject};

#[derive(Parser)]
#[command(
    name = "travelshed",
    version,
    about = "Road-network accessibility analysis for school safety studies"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Travel-time isochrone polygons from schools over a road network
    Isochrones(isochrones::IsochronesArgs),
    /// School buffers plus nearest police/fire station distances
    Proximity(proximity::ProximityArgs),
    /// School buffers with counts of facilities inside each buffer
    Coverage(coverage::CoverageArgs),
    /// Reproject a GeoJSON file between reference frames
    Reproject(reproject::ReprojectArgs),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Isochrones(args) => isochrones::run(&args),
        Commands::Proximity(args) => proximity::run(&args),
        Commands::Coverage(args) => coverage::run(&args),
        Commands::Reproject(args) => reproject::run(&args),
    };

    if let Err(err) = result {
        error!("{err}");
        std::process::exit(1);
    }
}
