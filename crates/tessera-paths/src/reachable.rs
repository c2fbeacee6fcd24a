//! Movement-budget reachability.

use std::collections::{BTreeMap, BTreeSet};

use tessera_grid::{Coord, TileMap};

use crate::costs::MoveCosts;
use crate::dijkstra::Limit;
use crate::error::PathError;
use crate::graph::{Graph, Node, NodeId};
use crate::neighbors::Neighbors;

/// Every tile a mover can reach within its budget.
///
/// Owns the solved graph so that routes to any reachable tile can be
/// reconstructed after the search. Only settled nodes are visible through
/// this type; tiles that were touched by relaxation but lie beyond the budget
/// are not part of the result.
#[derive(Debug, Clone)]
pub struct Reachable {
    graph: Graph,
    order: Vec<NodeId>,
    budget: f64,
}

impl Reachable {
    pub(crate) fn solve<M: TileMap + ?Sized>(
        map: &M,
        budget: f64,
        start: Coord,
        costs: &MoveCosts,
    ) -> Result<Self, PathError> {
        if budget.is_nan() || budget < 0.0 {
            return Err(PathError::InvalidBudget(budget));
        }
        let mut graph = Graph::build(map, start, false, costs)?;
        let order = graph.settle(Limit::Budget(budget));
        log::debug!(
            "{} of {} tiles reachable from {start} with budget {budget}",
            order.len(),
            graph.len()
        );
        Ok(Self {
            graph,
            order,
            budget,
        })
    }

    /// The budget this set was computed for.
    #[inline]
    pub fn budget(&self) -> f64 {
        self.budget
    }

    /// The mover's own tile.
    #[inline]
    pub fn start(&self) -> Coord {
        self.graph.node(self.graph.start()).coord()
    }

    /// Number of reachable tiles, the start included.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always `false`: the start is reachable.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Reachable node at `c`.
    pub fn get(&self, c: Coord) -> Option<&Node> {
        self.graph.get(c).filter(|n| n.is_settled())
    }

    /// Reachable node by `"x,y"` key.
    pub fn get_key(&self, key: &str) -> Option<&Node> {
        key.parse().ok().and_then(|c| self.get(c))
    }

    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        self.get(c).is_some()
    }

    /// Cheapest cost to reach `c`, if within budget.
    pub fn distance(&self, c: Coord) -> Option<f64> {
        self.get(c).map(Node::distance)
    }

    /// Cheapest route from the start to `c`, both inclusive.
    pub fn path_to(&self, c: Coord) -> Option<Vec<Coord>> {
        let id = self.graph.id_at(c)?;
        if !self.graph.node(id).is_settled() {
            return None;
        }
        Some(self.graph.reconstruct(id))
    }

    /// Reachable nodes in the order they were settled (non-decreasing
    /// distance).
    pub fn iter(&self) -> impl Iterator<Item = &Node> + '_ {
        self.order.iter().map(|&id| self.graph.node(id))
    }

    /// Reachable coordinates in settle order.
    pub fn coords(&self) -> Vec<Coord> {
        self.iter().map(Node::coord).collect()
    }

    /// Coordinate to distance map, ordered row-major.
    pub fn distances(&self) -> BTreeMap<Coord, f64> {
        self.iter().map(|n| (n.coord(), n.distance())).collect()
    }

    /// In-bounds tiles orthogonally adjacent to the reachable set but not in
    /// it: walls, occupied tiles and tiles just out of range.
    pub fn frontier(&self) -> BTreeSet<Coord> {
        let bounds = self.graph.bounds();
        let mut nb = Neighbors::new();
        let mut out = BTreeSet::new();
        for node in self.iter() {
            for &c in nb.cardinal_filtered(bounds, node.coord(), |c| !self.contains(c)) {
                out.insert(c);
            }
        }
        out
    }

    /// The underlying solved graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }
}
