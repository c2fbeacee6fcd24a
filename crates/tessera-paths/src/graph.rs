//! Search graph built fresh from a grid snapshot for every query.
//!
//! Nodes live in an arena owned by the [`Graph`]; neighbor links and
//! backpointers are [`NodeId`] indices into it, so the whole graph is dropped
//! in one go once a query is answered.

use tessera_grid::{Coord, Range, Terrain, TileMap};

use crate::costs::MoveCosts;
use crate::error::PathError;
use crate::neighbors::Neighbors;

/// Index of a node in its graph's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One traversable tile during a single search.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) coord: Coord,
    pub(crate) terrain: Terrain,
    pub(crate) entry_cost: f64,
    pub(crate) distance: f64,
    pub(crate) neighbors: Vec<NodeId>,
    pub(crate) previous: Option<NodeId>,
    pub(crate) settled: bool,
}

impl Node {
    #[inline]
    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// Canonical `"x,y"` key of the node's coordinate.
    pub fn key(&self) -> String {
        self.coord.key()
    }

    /// Terrain of the tile when the graph was built.
    #[inline]
    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    /// Cost of stepping onto this tile, fixed at build time.
    #[inline]
    pub fn entry_cost(&self) -> f64 {
        self.entry_cost
    }

    /// Best known distance from the start; `+∞` until reached.
    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    #[inline]
    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }

    /// Predecessor on the best known route from the start.
    #[inline]
    pub fn previous(&self) -> Option<NodeId> {
        self.previous
    }

    /// Whether the node's distance is final.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.settled
    }
}

/// Node arena plus a flat per-cell lookup table over the grid bounds.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
    lookup: Vec<Option<NodeId>>,
    bounds: Range,
    start: NodeId,
}

impl Graph {
    /// Build the graph of tiles reachable from `start`.
    ///
    /// The whole grid is scanned in row-major order and node ids follow that
    /// order, which makes them a deterministic tie-break for the solvers.
    /// A tile becomes a node iff it is not a wall, has no occupant and is
    /// connected to `start` through such tiles. The start itself is admitted
    /// regardless of its occupant. Every distance starts at `+∞`; the solver
    /// seeds the start.
    pub fn build<M: TileMap + ?Sized>(
        map: &M,
        start: Coord,
        ignore_doors: bool,
        costs: &MoveCosts,
    ) -> Result<Graph, PathError> {
        let bounds = map.bounds();
        if !bounds.contains(start) {
            return Err(PathError::OutOfBounds { at: start, bounds });
        }

        // Whole-grid scan: entry cost of every admissible tile.
        let mut admitted: Vec<Option<(Terrain, f64)>> = Vec::with_capacity(bounds.len());
        for c in bounds.iter() {
            let Some(tile) = map.tile(c) else {
                log::warn!("tile map reports no tile at {c} inside {bounds}");
                return Err(PathError::InconsistentGrid(c));
            };
            let admissible = c == start || tile.occupant.is_none();
            let cost = costs
                .entry_cost(tile.terrain, ignore_doors)
                .filter(|_| admissible);
            if c == start && cost.is_none() {
                return Err(PathError::StartBlocked(start));
            }
            admitted.push(cost.map(|cost| (tile.terrain, cost)));
        }

        // Keep only the component connected to the start.
        let mut connected = vec![false; bounds.len()];
        let mut stack = Vec::new();
        let mut nb = Neighbors::new();
        let si = Self::flat(bounds, start);
        connected[si] = true;
        stack.push(start);
        while let Some(c) = stack.pop() {
            for &n in nb.cardinal_in(bounds, c) {
                let ni = Self::flat(bounds, n);
                if !connected[ni] && admitted[ni].is_some() {
                    connected[ni] = true;
                    stack.push(n);
                }
            }
        }

        let mut nodes = Vec::new();
        let mut lookup = vec![None; bounds.len()];
        for (i, c) in bounds.iter().enumerate() {
            let Some((terrain, entry_cost)) = admitted[i].filter(|_| connected[i]) else {
                continue;
            };
            lookup[i] = Some(NodeId(nodes.len()));
            nodes.push(Node {
                coord: c,
                terrain,
                entry_cost,
                distance: f64::INFINITY,
                neighbors: Vec::new(),
                previous: None,
                settled: false,
            });
        }

        for node in nodes.iter_mut() {
            for &n in nb.cardinal_in(bounds, node.coord) {
                if let Some(id) = lookup[Self::flat(bounds, n)] {
                    node.neighbors.push(id);
                }
            }
        }

        let start = lookup[si].ok_or(PathError::StartBlocked(start))?;
        log::debug!(
            "built graph from {} with {} nodes (ignore_doors={ignore_doors})",
            nodes[start.0].coord,
            nodes.len()
        );
        Ok(Graph {
            nodes,
            lookup,
            bounds,
            start,
        })
    }

    #[inline]
    fn flat(bounds: Range, c: Coord) -> usize {
        bounds.index_of(c).unwrap_or(usize::MAX)
    }

    /// Node for the start coordinate.
    #[inline]
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// Bounds of the grid the graph was built from.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node id at `c`, if that tile is part of the graph.
    #[inline]
    pub fn id_at(&self, c: Coord) -> Option<NodeId> {
        self.bounds.index_of(c).and_then(|i| self.lookup[i])
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Node at `c`, if that tile is part of the graph.
    pub fn get(&self, c: Coord) -> Option<&Node> {
        self.id_at(c).map(|id| self.node(id))
    }

    /// Nodes in insertion (row-major) order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Walk backpointers from `end` to the root, returned root first.
    ///
    /// A node with no predecessor yields a one-element path.
    pub fn reconstruct(&self, end: NodeId) -> Vec<Coord> {
        let mut path = Vec::new();
        let mut cur = Some(end);
        while let Some(id) = cur {
            let node = self.node(id);
            path.push(node.coord);
            cur = node.previous;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_grid::{ActorId, Grid, Range, Tile};

    fn build(src: &str, start: Coord, ignore_doors: bool) -> Graph {
        let grid = Grid::parse(src).unwrap();
        Graph::build(&grid, start, ignore_doors, &MoveCosts::default()).unwrap()
    }

    #[test]
    fn nodes_follow_row_major_order() {
        let g = build("...\n...\n...", Coord::new(1, 1), false);
        assert_eq!(g.len(), 9);
        let coords: Vec<_> = g.iter().map(|(_, n)| n.coord()).collect();
        let expected: Vec<_> = Range::new(0, 0, 3, 3).iter().collect();
        assert_eq!(coords, expected);
        assert_eq!(g.start(), NodeId(4));
    }

    #[test]
    fn walls_and_occupants_are_excluded() {
        let g = build("1.#\n.2.\n...", Coord::new(0, 0), false);
        // The start keeps its occupant but is still a node.
        assert!(g.get(Coord::new(0, 0)).is_some());
        assert!(g.get(Coord::new(2, 0)).is_none());
        assert!(g.get(Coord::new(1, 1)).is_none());
        assert_eq!(g.len(), 7);
    }

    #[test]
    fn disconnected_tiles_are_excluded() {
        let g = build("..#..\n..#..", Coord::new(0, 0), false);
        assert_eq!(g.len(), 4);
        assert!(g.get(Coord::new(3, 0)).is_none());
    }

    #[test]
    fn entry_costs_by_terrain() {
        let g = build(".~*/+", Coord::new(0, 0), false);
        let costs: Vec<_> = g.iter().map(|(_, n)| n.entry_cost()).collect();
        assert_eq!(costs, vec![1.0, 2.0, 0.0001, 1.0, 6.0]);
        let g = build(".~*/+", Coord::new(0, 0), true);
        assert_eq!(g.get(Coord::new(4, 0)).unwrap().entry_cost(), 1.0);
        assert_eq!(g.get(Coord::new(4, 0)).unwrap().terrain(), Terrain::ClosedDoor);
    }

    #[test]
    fn edges_are_orthogonal_and_symmetric() {
        let g = build("...\n.#.\n...", Coord::new(0, 0), false);
        for (id, node) in g.iter() {
            for &n in node.neighbors() {
                let other = g.node(n);
                assert!(node.coord().is_adjacent(other.coord()));
                assert!(other.neighbors().contains(&id));
            }
        }
        let corner = g.get(Coord::new(0, 0)).unwrap();
        assert_eq!(corner.neighbors().len(), 2);
        let edge = g.get(Coord::new(1, 0)).unwrap();
        assert_eq!(edge.neighbors().len(), 2);
    }

    #[test]
    fn distances_start_infinite() {
        let g = build("...", Coord::new(0, 0), false);
        assert!(g.iter().all(|(_, n)| n.distance().is_infinite()));
        assert!(g.iter().all(|(_, n)| !n.is_settled() && n.previous().is_none()));
    }

    #[test]
    fn start_preconditions() {
        let grid = Grid::parse("#..").unwrap();
        let costs = MoveCosts::default();
        assert_eq!(
            Graph::build(&grid, Coord::new(0, 0), false, &costs).unwrap_err(),
            PathError::StartBlocked(Coord::new(0, 0))
        );
        assert!(matches!(
            Graph::build(&grid, Coord::new(3, 0), false, &costs),
            Err(PathError::OutOfBounds { .. })
        ));
    }

    struct Holey(Grid);

    impl TileMap for Holey {
        fn bounds(&self) -> Range {
            self.0.bounds()
        }
        fn tile(&self, c: Coord) -> Option<&Tile> {
            if c == Coord::new(1, 0) { None } else { self.0.tile(c) }
        }
    }

    #[test]
    fn inconsistent_map_is_reported() {
        let map = Holey(Grid::new(3, 1));
        assert_eq!(
            Graph::build(&map, Coord::new(0, 0), false, &MoveCosts::default()).unwrap_err(),
            PathError::InconsistentGrid(Coord::new(1, 0))
        );
    }

    #[test]
    fn reconstruct_single_node() {
        let mut grid = Grid::new(2, 1);
        grid.set_occupant(Coord::new(0, 0), ActorId(1)).unwrap();
        let g = Graph::build(&grid, Coord::new(0, 0), false, &MoveCosts::default()).unwrap();
        assert_eq!(g.reconstruct(g.start()), vec![Coord::new(0, 0)]);
    }
}
