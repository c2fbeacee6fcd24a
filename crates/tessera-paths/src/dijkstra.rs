use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::graph::{Graph, NodeId};

/// Heap entry, ordered so that `BinaryHeap` (a max-heap) pops the smallest
/// distance first and, among equal distances, the lowest node id.
#[derive(Clone, Copy, Debug)]
struct NodeRef {
    id: NodeId,
    distance: f64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeRef {}

/// When the settle loop stops.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Limit {
    /// Settle nodes while `floor(distance) <= floor(budget)`.
    Budget(f64),
    /// Settle until this node is settled or the graph is exhausted.
    Target(NodeId),
}

/// `floor(distance) <= floor(budget)`.
///
/// Flooring both sides lets a run of near-free slippery steps not push an
/// integer budget over its limit.
#[inline]
pub(crate) fn within_budget(distance: f64, budget: f64) -> bool {
    distance.floor() <= budget.floor()
}

impl Graph {
    /// Run Dijkstra from the graph's start node and return the settle order.
    ///
    /// Nodes are settled at most once. A neighbor is relaxed only on a
    /// strictly shorter distance, which is also the only time its
    /// backpointer changes.
    pub(crate) fn settle(&mut self, limit: Limit) -> Vec<NodeId> {
        let start = self.start();
        {
            let n = self.node_mut(start);
            n.distance = 0.0;
            n.previous = None;
        }

        let mut open = BinaryHeap::new();
        open.push(NodeRef {
            id: start,
            distance: 0.0,
        });
        let mut order = Vec::new();

        while let Some(current) = open.pop() {
            let node = self.node(current.id);
            // Stale entry: already settled or superseded by a shorter push.
            if node.settled || current.distance > node.distance {
                continue;
            }
            if let Limit::Budget(budget) = limit {
                // The heap minimum is out of budget, so is everything else.
                if !within_budget(node.distance, budget) {
                    break;
                }
            }

            let d = node.distance;
            self.node_mut(current.id).settled = true;
            order.push(current.id);
            log::trace!("settled {} at {d}", self.node(current.id).coord());

            if let Limit::Target(target) = limit {
                if current.id == target {
                    break;
                }
            }

            for i in 0..self.node(current.id).neighbors.len() {
                let nid = self.node(current.id).neighbors[i];
                let n = self.node_mut(nid);
                if n.settled {
                    continue;
                }
                let candidate = d + n.entry_cost;
                if candidate < n.distance {
                    n.distance = candidate;
                    n.previous = Some(current.id);
                    open.push(NodeRef {
                        id: nid,
                        distance: candidate,
                    });
                }
            }
        }

        order
    }
}
