//! Travel-time reachability reduced to convex-hull polygons
//!
//! The reduction: one shortest-path pass from the center, filter the
//! node-to-time map by each threshold, take the convex hull of the
//! surviving node positions. Thresholds that reach fewer than three
//! distinct positions yield no polygon and are skipped.

use geo::{ConvexHull, MultiPoint, Point, Polygon};
use itertools::Itertools;
use rayon::prelude::*;

use super::dijkstra::travel_times_from;
use crate::model::RoadNetwork;
use crate::{Error, RoadNodeId, Seconds};

/// Reachability polygon for one (center, threshold) pair
#[derive(Debug, Clone)]
pub struct IsochroneBand {
    /// Travel-time limit in seconds
    pub threshold: Seconds,
    /// Convex hull of the node positions reachable within the limit
    pub polygon: Polygon<f64>,
}

/// Node ids reachable from `center` within `limit` seconds
pub fn reachable_nodes(
    network: &RoadNetwork,
    center: RoadNodeId,
    limit: Seconds,
) -> Vec<RoadNodeId> {
    travel_times_from(network, center, Some(limit))
        .into_iter()
        .filter(|&(_, time)| time <= limit)
        .map(|(node, _)| node)
        .collect()
}

/// Isochrone polygons for one center, one per non-degenerate threshold
///
/// A single shortest-path pass serves every threshold; reachable sets are
/// nested, so larger thresholds always contain the smaller ones.
///
/// # Errors
///
/// Fails when no threshold produces a polygon, rather than reporting an
/// empty result.
pub fn isochrone_bands(
    network: &RoadNetwork,
    center: RoadNodeId,
    thresholds: &[Seconds],
) -> Result<Vec<IsochroneBand>, Error> {
    let cutoff = thresholds.iter().copied().fold(0.0_f64, f64::max);
    let times = travel_times_from(network, center, Some(cutoff));

    let mut bands = Vec::with_capacity(thresholds.len());
    for &threshold in thresholds {
        let reachable: Vec<Point<f64>> = times
            .iter()
            .filter(|&(_, &time)| time <= threshold)
            .map(|(&node, _)| network.node_position(node))
            .collect();

        match hull_polygon(reachable) {
            Some(polygon) => bands.push(IsochroneBand { threshold, polygon }),
            None => log::debug!(
                "threshold {threshold}s reaches too few nodes for a polygon, skipping"
            ),
        }
    }

    if bands.is_empty() {
        return Err(Error::EmptyReachability {
            node: center.index(),
        });
    }
    Ok(bands)
}

/// Isochrone bands for many centers in parallel
pub fn bulk_isochrone_bands(
    network: &RoadNetwork,
    centers: &[RoadNodeId],
    thresholds: &[Seconds],
) -> Result<Vec<Vec<IsochroneBand>>, Error> {
    centers
        .par_iter()
        .map(|&center| isochrone_bands(network, center, thresholds))
        .collect()
}

/// Convex hull of the positions, or `None` for degenerate point sets
fn hull_polygon(points: Vec<Point<f64>>) -> Option<Polygon<f64>> {
    let distinct = points
        .iter()
        .map(|p| (p.x().to_bits(), p.y().to_bits()))
        .unique()
        .count();
    if distinct < 3 {
        return None;
    }
    Some(MultiPoint::from(points).convex_hull())
}
