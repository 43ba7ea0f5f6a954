//! Buffer rings around each school plus nearest police and fire station
//! distances, exported for the web map

use std::fs;
use std::path::PathBuf;

use clap::Args;
use geo::Geometry;
use log::info;
use serde_json::json;

use travelshed_core::io;
use travelshed_core::prelude::*;

#[derive(Args)]
pub struct ProximityArgs {
    /// School point layer (GeoJSON)
    #[arg(long)]
    pub schools: PathBuf,

    /// Police station point layer (GeoJSON)
    #[arg(long)]
    pub police: PathBuf,

    /// Fire station point layer (GeoJSON)
    #[arg(long)]
    pub fire: PathBuf,

    /// Buffer radii in miles
    #[arg(long, value_delimiter = ',', default_values_t = vec![0.5, 1.0, 1.5])]
    pub miles: Vec<f64>,

    /// Directory for the buffer and processed-school outputs
    #[arg(long, short)]
    pub output_dir: PathBuf,
}

pub fn run(args: &ProximityArgs) -> Result<(), Error> {
    // Distance and buffer math needs a metric frame
    let frame = Crs::WebMercator;
    let schools = io::read_point_layer(&args.schools)?.to_crs(frame);
    let police = io::read_point_layer(&args.police)?.to_crs(frame);
    let fire = io::read_point_layer(&args.fire)?.to_crs(frame);

    info!(
        "Loaded {} schools, {} police stations, {} fire stations",
        schools.len(),
        police.len(),
        fire.len()
    );

    fs::create_dir_all(&args.output_dir)?;

    for &miles in &args.miles {
        let radius = miles * METERS_PER_MILE;
        let features = schools
            .features
            .iter()
            .map(|school| {
                let ring = buffer_point(&school.geometry, radius, BUFFER_SEGMENTS);
                io::feature(&Geometry::Polygon(ring), school.properties.clone())
            })
            .collect();
        let path = args
            .output_dir
            .join(format!("schools_buffer_{miles}_mile.geojson"));
        io::write_collection(&path, features, frame)?;
        info!("{miles} mile buffers written to {}", path.display());
    }

    let to_police = nearest_distance_join(&schools, &police)?;
    let to_fire = nearest_distance_join(&schools, &fire)?;

    let features = schools
        .features
        .iter()
        .zip(to_police.iter().zip(&to_fire))
        .map(|(school, (police_m, fire_m))| {
            let mut properties = school.properties.clone();
            properties.insert("dist_to_police".to_string(), json!(police_m));
            properties.insert("dist_to_fire".to_string(), json!(fire_m));
            io::feature(&Geometry::Point(school.geometry), properties)
        })
        .collect();

    let processed = args.output_dir.join("processed_schools.geojson");
    io::write_collection(&processed, features, frame)?;
    info!(
        "Processed schools with station distances written to {}",
        processed.display()
    );
    Ok(())
}
