//! Buffer rings around each school with a count of the facilities each
//! ring contains

use std::path::PathBuf;

use clap::Args;
use geo::Geometry;
use log::info;
use serde_json::json;

use travelshed_core::io;
use travelshed_core::prelude::*;

#[derive(Args)]
pub struct CoverageArgs {
    /// School point layer (GeoJSON)
    #[arg(long)]
    pub schools: PathBuf,

    /// Facility point layer to count inside each buffer (GeoJSON)
    #[arg(long)]
    pub facilities: PathBuf,

    /// Buffer radius in miles
    #[arg(long, default_value_t = 1.0)]
    pub miles: f64,

    /// Output GeoJSON path for the analyzed buffers
    #[arg(long, short)]
    pub output: PathBuf,
}

pub fn run(args: &CoverageArgs) -> Result<(), Error> {
    let frame = Crs::WebMercator;
    let schools = io::read_point_layer(&args.schools)?.to_crs(frame);
    let facilities = io::read_point_layer(&args.facilities)?.to_crs(frame);

    info!(
        "Loaded {} schools and {} facilities",
        schools.len(),
        facilities.len()
    );

    let radius = args.miles * METERS_PER_MILE;
    let buffers: Vec<_> = schools
        .features
        .iter()
        .map(|school| buffer_point(&school.geometry, radius, BUFFER_SEGMENTS))
        .collect();

    let counts = count_within(&buffers, frame, &facilities)?;

    let features = schools
        .features
        .iter()
        .zip(buffers.into_iter().zip(counts))
        .map(|(school, (ring, count))| {
            let mut properties = school.properties.clone();
            properties.insert("facilities_within".to_string(), json!(count));
            io::feature(&Geometry::Polygon(ring), properties)
        })
        .collect();

    io::write_collection(&args.output, features, frame)?;
    info!("Analyzed buffers written to {}", args.output.display());
    Ok(())
}
