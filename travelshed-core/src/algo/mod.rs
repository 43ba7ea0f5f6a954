//! Spatial analysis routines: isochrones, buffers, and joins

pub mod buffer;
mod dijkstra;
pub mod isochrone;
pub mod join;

pub use buffer::{BUFFER_SEGMENTS, buffer_point};
pub use dijkstra::travel_times_from;
pub use isochrone::{IsochroneBand, bulk_isochrone_bands, isochrone_bands, reachable_nodes};
pub use join::{count_within, nearest_distance_join};
