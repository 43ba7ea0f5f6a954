//! Isochrone generation: snap each school to the road graph, run the
//! reachability reduction, export one hull polygon per threshold

use std::path::PathBuf;

use clap::Args;
use geo::Geometry;
use log::info;
use serde_json::json;

use travelshed_core::io;
use travelshed_core::prelude::*;

#[derive(Args)]
pub struct IsochronesArgs {
    /// Road network line layer (GeoJSON)
    #[arg(long)]
    pub network: PathBuf,

    /// School point layer (GeoJSON)
    #[arg(long)]
    pub schools: PathBuf,

    /// Analyze a single school by its `name` attribute (default: all)
    #[arg(long)]
    pub school: Option<String>,

    /// Travel-time thresholds in minutes
    #[arg(long, value_delimiter = ',', default_values_t = vec![5.0, 10.0, 15.0])]
    pub minutes: Vec<f64>,

    /// Assumed driving speed in miles per hour
    #[arg(long, default_value_t = 25.0)]
    pub speed_mph: f64,

    /// Output GeoJSON path, written in the processing frame (EPSG:3857)
    #[arg(long, short)]
    pub output: PathBuf,
}

pub fn run(args: &IsochronesArgs) -> Result<(), Error> {
    let thresholds: Vec<Seconds> = args.minutes.iter().map(|minutes| minutes * 60.0).collect();
    if thresholds.iter().any(|&t| t < 0.0) {
        return Err(Error::InvalidData(
            "travel-time thresholds must be non-negative".to_string(),
        ));
    }

    let roads = io::read_line_layer(&args.network)?;
    let network = build_road_network(
        &roads,
        &NetworkConfig {
            speed_mph: args.speed_mph,
        },
    )?;

    let schools = io::read_point_layer(&args.schools)?.to_crs(network.crs());
    let selected = select_schools(&schools.features, args.school.as_deref())?;

    let centers: Vec<RoadNodeId> = selected
        .iter()
        .map(|school| network.nearest_node(&school.geometry))
        .collect::<Result<_, _>>()?;

    let all_bands = bulk_isochrone_bands(&network, &centers, &thresholds)?;

    let mut features = Vec::new();
    for (school, bands) in selected.iter().zip(all_bands) {
        let name = school.require_str("name")?;
        info!("{}: {} isochrone band(s)", name, bands.len());
        for band in bands {
            let mut properties = serde_json::Map::new();
            properties.insert("name".to_string(), json!(name));
            properties.insert("travel_time".to_string(), json!(band.threshold));
            features.push(io::feature(&Geometry::Polygon(band.polygon), properties));
        }
    }

    io::write_collection(&args.output, features, network.crs())?;
    info!("Isochrone polygons exported to {}", args.output.display());
    Ok(())
}

/// All schools, or the one matching the requested `name` attribute
fn select_schools<'a>(
    schools: &'a [PointFeature],
    name: Option<&str>,
) -> Result<Vec<&'a PointFeature>, Error> {
    let Some(name) = name else {
        return Ok(schools.iter().collect());
    };

    let found = schools
        .iter()
        .find(|school| school.require_str("name").is_ok_and(|n| n == name));
    match found {
        Some(school) => {
            info!("Selected school for analysis: {name}");
            Ok(vec![school])
        }
        None => {
            let known: Vec<&str> = schools
                .iter()
                .filter_map(|school| school.require_str("name").ok())
                .collect();
            Err(Error::InvalidData(format!(
                "school `{name}` not found; known schools: {}",
                known.join(", ")
            )))
        }
    }
}
