//! Core library for road-network accessibility analysis
//!
//! Builds a travel-time weighted road graph from a GeoJSON line layer and
//! reduces shortest-path reachability to convex-hull isochrone polygons.
//! Also provides the buffer and spatial-join primitives used by the batch
//! pipelines, plus the coordinate-frame plumbing they all share.

pub mod algo;
pub mod crs;
mod error;
pub mod io;
pub mod loading;
pub mod model;
pub mod prelude;

pub use error::Error;

/// Travel time in seconds
pub type Seconds = f64;

/// Opaque handle of a node in the road graph
pub type RoadNodeId = petgraph::graph::NodeIndex;

/// Miles per hour to meters per second
pub const MPH_TO_MPS: f64 = 0.44704;

/// Meters per statute mile
pub const METERS_PER_MILE: f64 = 1609.34;
