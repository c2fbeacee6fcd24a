//! Unbounded shortest-path search between two tiles.

use std::collections::BTreeSet;

use tessera_grid::{ActorId, Coord, Terrain, TileMap, TileMapMut};

use crate::costs::MoveCosts;
use crate::dijkstra::Limit;
use crate::error::PathError;
use crate::graph::Graph;

/// A route between two tiles and the closed doors it goes through.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteInfo {
    /// Start to target, both inclusive.
    pub path: Vec<Coord>,
    /// Path coordinates that were closed doors when the route was computed.
    pub doors: BTreeSet<Coord>,
}

impl RouteInfo {
    #[inline]
    pub fn start(&self) -> Option<Coord> {
        self.path.first().copied()
    }

    #[inline]
    pub fn target(&self) -> Option<Coord> {
        self.path.last().copied()
    }

    /// Number of moves, i.e. path length without the start.
    #[inline]
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

pub(crate) fn find_path<M: TileMap + ?Sized>(
    map: &M,
    start: Coord,
    target: Coord,
    ignore_doors: bool,
    costs: &MoveCosts,
) -> Result<Option<RouteInfo>, PathError> {
    let mut graph = Graph::build(map, start, ignore_doors, costs)?;
    let Some(goal) = graph.id_at(target) else {
        log::debug!("no route {start} -> {target}: target not traversable from start");
        return Ok(None);
    };
    graph.settle(Limit::Target(goal));
    if !graph.node(goal).is_settled() {
        // Nodes only exist when connected to the start, so this means the
        // search ran dry before reaching the goal.
        log::debug!("no route {start} -> {target}: graph exhausted");
        return Ok(None);
    }

    let path = graph.reconstruct(goal);
    let doors = path
        .iter()
        .copied()
        .filter(|&c| graph.get(c).is_some_and(|n| n.terrain() == Terrain::ClosedDoor))
        .collect();
    log::debug!(
        "route {start} -> {target}: {} steps, cost {}",
        path.len().saturating_sub(1),
        graph.node(goal).distance()
    );
    Ok(Some(RouteInfo { path, doors }))
}

/// Clears the occupant of one tile for as long as it lives and puts it back
/// when dropped, including during unwinding.
struct ClearedOccupant<'a, M: TileMapMut + ?Sized> {
    map: &'a mut M,
    at: Coord,
    saved: Option<ActorId>,
}

impl<'a, M: TileMapMut + ?Sized> ClearedOccupant<'a, M> {
    fn new(map: &'a mut M, at: Coord) -> Self {
        let saved = map.replace_occupant(at, None);
        Self { map, at, saved }
    }

    fn map(&self) -> &M {
        &*self.map
    }
}

impl<M: TileMapMut + ?Sized> Drop for ClearedOccupant<'_, M> {
    fn drop(&mut self) {
        self.map.replace_occupant(self.at, self.saved);
    }
}

pub(crate) fn find_path_to_occupied<M: TileMapMut + ?Sized>(
    map: &mut M,
    start: Coord,
    target: Coord,
    ignore_doors: bool,
    costs: &MoveCosts,
) -> Result<Option<RouteInfo>, PathError> {
    let cleared = ClearedOccupant::new(map, target);
    find_path(cleared.map(), start, target, ignore_doors, costs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use tessera_grid::{Grid, Range, Tile};

    fn route(
        src: &str,
        start: (i32, i32),
        target: (i32, i32),
        ignore_doors: bool,
    ) -> Option<RouteInfo> {
        let grid = Grid::parse(src).unwrap();
        find_path(
            &grid,
            start.into(),
            target.into(),
            ignore_doors,
            &MoveCosts::default(),
        )
        .unwrap()
    }

    #[test]
    fn straight_route() {
        let r = route("....", (0, 0), (3, 0), false).unwrap();
        assert_eq!(
            r.path,
            vec![
                Coord::new(0, 0),
                Coord::new(1, 0),
                Coord::new(2, 0),
                Coord::new(3, 0)
            ]
        );
        assert!(r.doors.is_empty());
        assert_eq!(r.steps(), 3);
        assert_eq!(r.start(), Some(Coord::new(0, 0)));
        assert_eq!(r.target(), Some(Coord::new(3, 0)));
    }

    #[test]
    fn bisecting_wall_means_no_route() {
        assert_eq!(route("..#..\n..#..\n..#..", (0, 0), (4, 2), false), None);
        assert_eq!(route("..#..\n..#..\n..#..", (0, 0), (4, 2), true), None);
    }

    #[test]
    fn unreachable_or_blocked_targets() {
        // Wall target, occupied target and out-of-bounds target.
        assert_eq!(route("..#", (0, 0), (2, 0), false), None);
        assert_eq!(route("..1", (0, 0), (2, 0), false), None);
        assert_eq!(route("...", (0, 0), (7, 0), false), None);
    }

    #[test]
    fn start_equals_target() {
        let r = route("1..", (0, 0), (0, 0), false).unwrap();
        assert_eq!(r.path, vec![Coord::new(0, 0)]);
        assert_eq!(r.steps(), 0);
    }

    #[test]
    fn closed_door_detour_or_crossing() {
        // Crossing the door costs 6 + 1; walking around the wall costs 6.
        let src = "
            .+.
            .#.
            ...
        ";
        let around = route(src, (0, 0), (2, 0), false).unwrap();
        assert!(around.doors.is_empty());
        assert_eq!(around.path.len(), 7);

        let through = route(src, (0, 0), (2, 0), true).unwrap();
        assert_eq!(
            through.path,
            vec![Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)]
        );
        assert_eq!(through.doors, BTreeSet::from([Coord::new(1, 0)]));
    }

    #[test]
    fn doors_crossed_without_ignoring() {
        let r = route(".+.", (0, 0), (2, 0), false).unwrap();
        assert_eq!(r.doors, BTreeSet::from([Coord::new(1, 0)]));
        let r = route("./.", (0, 0), (2, 0), false).unwrap();
        assert!(r.doors.is_empty());
    }

    #[test]
    fn occupied_target_is_restored() {
        let mut grid = Grid::parse("1...2").unwrap();
        let costs = MoveCosts::default();
        let target = Coord::new(4, 0);
        let r = find_path_to_occupied(&mut grid, Coord::new(0, 0), target, false, &costs)
            .unwrap()
            .unwrap();
        assert_eq!(r.target(), Some(target));
        assert_eq!(r.path.len(), 5);
        assert_eq!(grid.at(target).unwrap().occupant, Some(ActorId(2)));
    }

    #[test]
    fn occupant_restored_on_failure() {
        let mut grid = Grid::parse("1.#2").unwrap();
        let costs = MoveCosts::default();
        let target = Coord::new(3, 0);
        assert_eq!(
            find_path_to_occupied(&mut grid, Coord::new(0, 0), target, false, &costs),
            Ok(None)
        );
        assert_eq!(grid.at(target).unwrap().occupant, Some(ActorId(2)));
        // Caller misuse still restores.
        assert!(find_path_to_occupied(&mut grid, Coord::new(9, 9), target, false, &costs).is_err());
        assert_eq!(grid.at(target).unwrap().occupant, Some(ActorId(2)));
    }

    /// A map that panics while the engine reads it.
    struct Exploding {
        grid: Grid,
    }

    impl TileMap for Exploding {
        fn bounds(&self) -> Range {
            self.grid.bounds()
        }
        fn tile(&self, c: Coord) -> Option<&Tile> {
            if c == Coord::new(1, 0) {
                panic!("tile storage went away");
            }
            self.grid.tile(c)
        }
    }

    impl TileMapMut for Exploding {
        fn replace_occupant(&mut self, c: Coord, occupant: Option<ActorId>) -> Option<ActorId> {
            self.grid.replace_occupant(c, occupant)
        }
    }

    #[test]
    fn occupant_restored_on_panic() {
        let mut map = Exploding {
            grid: Grid::parse("1.2").unwrap(),
        };
        let target = Coord::new(2, 0);
        let result = catch_unwind(AssertUnwindSafe(|| {
            find_path_to_occupied(
                &mut map,
                Coord::new(0, 0),
                target,
                false,
                &MoveCosts::default(),
            )
        }));
        assert!(result.is_err());
        assert_eq!(map.grid.at(target).unwrap().occupant, Some(ActorId(2)));
    }
}
