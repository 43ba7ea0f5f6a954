use geo::{Coord, Euclidean, Haversine, Length, LineString, Point};
use geojson::{JsonObject, JsonValue};
use hashbrown::HashMap;
use log::info;
use petgraph::graph::DiGraph;

use super::NetworkConfig;
use crate::crs::{self, Crs};
use crate::io::LineLayer;
use crate::model::{RoadEdge, RoadNode, RoadNetwork};
use crate::{Error, RoadNodeId, Seconds};

/// Grid size for welding shared endpoints, in source-frame units
fn quantum(crs: Crs) -> f64 {
    if crs.is_geographic() { 1e-7 } else { 1e-2 }
}

/// Builds the travel-time weighted road graph in Web Mercator
///
/// Each line feature becomes one edge between its endpoints - both
/// directions unless the feature carries a truthy `oneway` property -
/// weighted by geometric length over the configured speed. Endpoint
/// coordinates are welded into shared nodes.
///
/// # Errors
///
/// Returns an error for a non-positive speed or a layer with no usable
/// line features.
pub fn build_road_network(roads: &LineLayer, config: &NetworkConfig) -> Result<RoadNetwork, Error> {
    validate_config(config)?;

    info!(
        "Building road network from {} line features",
        roads.features.len()
    );

    let mut graph = DiGraph::new();
    let mut nodes: HashMap<(i64, i64), RoadNodeId> = HashMap::new();
    let scale = 1.0 / quantum(roads.crs);
    let speed_mps = config.speed_mps();

    for feature in &roads.features {
        let line = &feature.geometry;
        if line.0.len() < 2 {
            continue;
        }

        let length = segment_length(line, roads.crs);
        // Zero-length segments still connect their endpoints, at no cost
        let travel_time: Seconds = if length > 0.0 { length / speed_mps } else { 0.0 };

        let source = intern_node(&mut graph, &mut nodes, line.0[0], roads.crs, scale);
        let target = intern_node(
            &mut graph,
            &mut nodes,
            line.0[line.0.len() - 1],
            roads.crs,
            scale,
        );

        graph.add_edge(source, target, RoadEdge { length, travel_time });
        if !is_oneway(&feature.properties) {
            graph.add_edge(target, source, RoadEdge { length, travel_time });
        }
    }

    if graph.node_count() == 0 {
        return Err(Error::InvalidData(
            "road layer contains no usable line features".to_string(),
        ));
    }

    let network = RoadNetwork::new(graph, Crs::WebMercator);
    info!(
        "Road network ready: {} nodes, {} edges",
        network.node_count(),
        network.edge_count()
    );
    Ok(network)
}

fn validate_config(config: &NetworkConfig) -> Result<(), Error> {
    if !config.speed_mph.is_finite() || config.speed_mph <= 0.0 {
        return Err(Error::InvalidData(format!(
            "driving speed must be positive, got {} mph",
            config.speed_mph
        )));
    }
    Ok(())
}

/// Geometric length in meters: geodesic for geographic input, planar
/// otherwise
fn segment_length(line: &LineString<f64>, crs: Crs) -> f64 {
    if crs.is_geographic() {
        Haversine.length(line)
    } else {
        Euclidean.length(line)
    }
}

fn intern_node(
    graph: &mut DiGraph<RoadNode, RoadEdge>,
    nodes: &mut HashMap<(i64, i64), RoadNodeId>,
    coord: Coord<f64>,
    source_crs: Crs,
    scale: f64,
) -> RoadNodeId {
    let key = (
        (coord.x * scale).round() as i64,
        (coord.y * scale).round() as i64,
    );
    *nodes.entry(key).or_insert_with(|| {
        let projected = crs::reproject_coord(coord, source_crs, Crs::WebMercator);
        graph.add_node(RoadNode {
            geometry: Point::from(projected),
        })
    })
}

fn is_oneway(properties: &JsonObject) -> bool {
    match properties.get("oneway") {
        Some(JsonValue::Bool(flag)) => *flag,
        Some(JsonValue::Number(n)) => n.as_i64() == Some(1),
        Some(JsonValue::String(s)) => matches!(s.as_str(), "yes" | "true" | "1"),
        _ => false,
    }
}
