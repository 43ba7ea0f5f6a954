//! Road network components - nodes and edges

use geo::Point;

use crate::Seconds;

/// Road graph node (an intersection or segment endpoint)
#[derive(Debug, Clone)]
pub struct RoadNode {
    /// Node coordinates in the network's projected frame
    pub geometry: Point<f64>,
}

/// Road graph edge (a drivable street segment)
#[derive(Debug, Clone)]
pub struct RoadEdge {
    /// Segment length in meters
    pub length: f64,
    /// Drive-through time in seconds at the assumed speed
    pub travel_time: Seconds,
}
