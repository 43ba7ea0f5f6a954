//! Routable road graph with a spatial index over its nodes

use geo::Point;
use petgraph::graph::DiGraph;
use rstar::RTree;
use rstar::primitives::GeomWithData;

use super::components::{RoadEdge, RoadNode};
use crate::crs::Crs;
use crate::{Error, RoadNodeId};

/// R-tree entry: node position keyed by its graph index
pub type IndexedPoint = GeomWithData<[f64; 2], RoadNodeId>;

/// Directed road graph in a projected frame, with nearest-node lookup
#[derive(Debug, Clone)]
pub struct RoadNetwork {
    pub graph: DiGraph<RoadNode, RoadEdge>,
    index: RTree<IndexedPoint>,
    crs: Crs,
}

impl RoadNetwork {
    pub(crate) fn new(graph: DiGraph<RoadNode, RoadEdge>, crs: Crs) -> Self {
        let entries = graph
            .node_indices()
            .map(|idx| {
                let position = graph[idx].geometry;
                IndexedPoint::new([position.x(), position.y()], idx)
            })
            .collect::<Vec<_>>();
        Self {
            graph,
            index: RTree::bulk_load(entries),
            crs,
        }
    }

    pub fn crs(&self) -> Crs {
        self.crs
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Graph node closest to the query point, which must be in the same
    /// frame as the network
    ///
    /// # Errors
    ///
    /// Returns an error when the graph has no nodes.
    pub fn nearest_node(&self, point: &Point<f64>) -> Result<RoadNodeId, Error> {
        let nearest = self
            .index
            .nearest_neighbor(&[point.x(), point.y()])
            .ok_or(Error::NoPointsFound)?;
        let [x, y] = *nearest.geom();
        log::debug!(
            "snapped ({:.1}, {:.1}) to node {} at ({x:.1}, {y:.1})",
            point.x(),
            point.y(),
            nearest.data.index()
        );
        Ok(nearest.data)
    }

    pub fn node_position(&self, node: RoadNodeId) -> Point<f64> {
        self.graph[node].geometry
    }
}
