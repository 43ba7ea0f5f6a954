//! End-to-end runs over a synthetic road grid: load, snap, reduce to
//! isochrone hulls, join against facility layers, round-trip through
//! GeoJSON files.

use std::path::PathBuf;

use geo::{Area, Contains, Geometry, Point, line_string};
use geojson::JsonObject;
use serde_json::json;

use travelshed_core::io;
use travelshed_core::prelude::*;

/// 15x15 grid of two-way streets in Web Mercator, 100 m spacing
fn grid_roads() -> LineLayer {
    let size = 15;
    let spacing = 100.0;
    let mut features = Vec::new();
    let mut push = |x0: f64, y0: f64, x1: f64, y1: f64| {
        features.push(LineFeature {
            geometry: line_string![(x: x0, y: y0), (x: x1, y: y1)],
            properties: JsonObject::new(),
        });
    };
    for row in 0..size {
        for col in 0..size {
            let (x, y) = (col as f64 * spacing, row as f64 * spacing);
            if col + 1 < size {
                push(x, y, x + spacing, y);
            }
            if row + 1 < size {
                push(x, y, x, y + spacing);
            }
        }
    }
    LineLayer {
        features,
        crs: Crs::WebMercator,
    }
}

fn school_layer() -> PointLayer {
    let schools = [
        ("Central Elementary", 700.0, 700.0),
        ("Corner Elementary", 210.0, 190.0),
        ("East Middle", 1190.0, 310.0),
    ];
    PointLayer {
        features: schools
            .iter()
            .map(|&(name, x, y)| PointFeature {
                geometry: Point::new(x, y),
                properties: {
                    let mut properties = JsonObject::new();
                    properties.insert("name".to_string(), json!(name));
                    properties
                },
            })
            .collect(),
        crs: Crs::WebMercator,
    }
}

#[test]
fn isochrones_for_three_schools_nest_by_threshold() {
    let network = build_road_network(&grid_roads(), &NetworkConfig { speed_mph: 25.0 }).unwrap();
    let schools = school_layer();

    // 25 mph is about 11.18 m/s, so a 100 m edge costs about 8.95 s
    let thresholds: Vec<Seconds> = vec![60.0, 300.0];

    for school in &schools.features {
        let center = network.nearest_node(&school.geometry).unwrap();
        let bands = isochrone_bands(&network, center, &thresholds).unwrap();
        assert_eq!(bands.len(), 2);

        let small = &bands[0];
        let large = &bands[1];
        assert_eq!(small.threshold, 60.0);
        assert_eq!(large.threshold, 300.0);

        // Each hull contains the snapped center position
        let position = network.node_position(center);
        assert!(small.polygon.contains(&position));
        assert!(large.polygon.contains(&position));

        // The 300 s hull strictly contains the 60 s hull
        assert!(large.polygon.contains(&small.polygon));
        assert!(large.polygon.unsigned_area() > small.polygon.unsigned_area());
    }
}

#[test]
fn bulk_mode_covers_every_school() {
    let network = build_road_network(&grid_roads(), &NetworkConfig::default()).unwrap();
    let schools = school_layer();
    let centers: Vec<RoadNodeId> = schools
        .features
        .iter()
        .map(|school| network.nearest_node(&school.geometry).unwrap())
        .collect();

    let all_bands = bulk_isochrone_bands(&network, &centers, &[60.0, 300.0]).unwrap();
    assert_eq!(all_bands.len(), 3);
    assert!(all_bands.iter().all(|bands| !bands.is_empty()));
}

#[test]
fn buffers_and_joins_compose_into_the_proximity_pipeline() {
    let schools = school_layer();
    let stations = PointLayer {
        features: vec![PointFeature {
            geometry: Point::new(750.0, 740.0),
            properties: JsonObject::new(),
        }],
        crs: Crs::WebMercator,
    };

    let distances = nearest_distance_join(&schools, &stations).unwrap();
    assert_eq!(distances.len(), 3);
    // Central Elementary is 50 m east and 40 m north of the station
    assert!((distances[0] - (50.0_f64.powi(2) + 40.0_f64.powi(2)).sqrt()).abs() < 1e-9);

    let buffers: Vec<_> = schools
        .features
        .iter()
        .map(|school| buffer_point(&school.geometry, 0.25 * METERS_PER_MILE, BUFFER_SEGMENTS))
        .collect();
    let counts = count_within(&buffers, Crs::WebMercator, &stations).unwrap();
    // Only the central school's quarter-mile buffer reaches the station
    assert_eq!(counts, vec![1, 0, 0]);
}

#[test]
fn exported_isochrones_round_trip_through_geojson() {
    let network = build_road_network(&grid_roads(), &NetworkConfig::default()).unwrap();
    let schools = school_layer();
    let school = &schools.features[0];
    let center = network.nearest_node(&school.geometry).unwrap();
    let bands = isochrone_bands(&network, center, &[300.0]).unwrap();

    let features = bands
        .iter()
        .map(|band| {
            let mut properties = JsonObject::new();
            properties.insert("name".to_string(), json!("Central Elementary"));
            properties.insert("travel_time".to_string(), json!(band.threshold));
            io::feature(&Geometry::Polygon(band.polygon.clone()), properties)
        })
        .collect();

    let dir = std::env::temp_dir();
    let written = dir.join(format!("travelshed_iso_{}.geojson", std::process::id()));
    let reprojected: PathBuf = dir.join(format!("travelshed_iso_{}_4326.geojson", std::process::id()));

    io::write_collection(&written, features, network.crs()).unwrap();

    // The projected file declares its frame and reprojects cleanly to WGS84
    io::reproject_file(&written, &reprojected, None, Crs::Wgs84).unwrap();
    let raw = std::fs::read_to_string(&reprojected).unwrap();
    assert!(!raw.contains("urn:ogc:def:crs"));

    std::fs::remove_file(&written).ok();
    std::fs::remove_file(&reprojected).ok();
}
