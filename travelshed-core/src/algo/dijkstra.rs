//! Single-source shortest travel times over the road graph

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hashbrown::HashMap;
use petgraph::visit::EdgeRef;

use crate::model::RoadNetwork;
use crate::{RoadNodeId, Seconds};

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: Seconds,
    node: RoadNodeId,
}

impl Eq for State {}

// Min-heap by cost (reversed from standard Rust BinaryHeap). Travel times
// are finite and non-negative, so total_cmp is a usable total order.
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.index().cmp(&self.node.index()))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra travel times in seconds from `start` to every reachable node
///
/// Unreachable nodes are absent from the result. With a cutoff, nodes
/// already costing more than the cutoff are not expanded further; entries
/// above the cutoff may still appear in the map and must be filtered by
/// the caller.
pub fn travel_times_from(
    network: &RoadNetwork,
    start: RoadNodeId,
    cutoff: Option<Seconds>,
) -> HashMap<RoadNodeId, Seconds> {
    let mut times: HashMap<RoadNodeId, Seconds> = HashMap::new();
    let mut heap = BinaryHeap::new();

    times.insert(start, 0.0);
    heap.push(State {
        cost: 0.0,
        node: start,
    });

    while let Some(State { cost, node }) = heap.pop() {
        // Skip if we've found a better path
        if let Some(&best) = times.get(&node) {
            if cost > best {
                continue;
            }
        }

        // Stop expanding past the cutoff
        if let Some(max) = cutoff {
            if cost > max {
                continue;
            }
        }

        for edge in network.graph.edges(node) {
            let next = edge.target();
            let next_cost = cost + edge.weight().travel_time;

            match times.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    times
}
