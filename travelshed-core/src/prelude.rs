// Re-export key components
pub use crate::algo::buffer::{BUFFER_SEGMENTS, buffer_point};
pub use crate::algo::isochrone::{
    IsochroneBand, bulk_isochrone_bands, isochrone_bands, reachable_nodes,
};
pub use crate::algo::join::{count_within, nearest_distance_join};
pub use crate::crs::{Crs, reproject_geometry, reproject_point};
pub use crate::io::{LineFeature, LineLayer, PointFeature, PointLayer};
pub use crate::loading::{NetworkConfig, build_road_network};
pub use crate::model::RoadNetwork;

// Core types for the road network
pub use crate::Error;
pub use crate::RoadNodeId;
pub use crate::Seconds; // seconds

pub use crate::{METERS_PER_MILE, MPH_TO_MPS};
