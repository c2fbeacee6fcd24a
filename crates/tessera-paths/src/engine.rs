use tessera_grid::{Coord, TileMap, TileMapMut};

use crate::costs::MoveCosts;
use crate::error::PathError;
use crate::reachable::Reachable;
use crate::route::{self, RouteInfo};
use crate::validate;

/// Movement queries with a given cost table.
///
/// `MoveEngine` is stateless apart from its costs: every query builds a new
/// graph from the map it is handed and drops it before returning, so one
/// engine can be shared freely between games and threads.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveEngine {
    costs: MoveCosts,
}

impl MoveEngine {
    /// Create an engine, rejecting cost tables the solvers cannot run on.
    pub fn new(costs: MoveCosts) -> Result<Self, PathError> {
        costs.validate()?;
        Ok(Self { costs })
    }

    #[inline]
    pub fn costs(&self) -> &MoveCosts {
        &self.costs
    }

    /// Every tile reachable from `start` within `budget` movement points.
    pub fn find_reachable<M: TileMap + ?Sized>(
        &self,
        map: &M,
        budget: f64,
        start: Coord,
    ) -> Result<Reachable, PathError> {
        Reachable::solve(map, budget, start, &self.costs)
    }

    /// Cheapest route from `start` to `target` with no budget limit.
    ///
    /// With `ignore_doors`, closed doors are priced like open ones. Returns
    /// `Ok(None)` when the target cannot be reached.
    pub fn find_path<M: TileMap + ?Sized>(
        &self,
        map: &M,
        start: Coord,
        target: Coord,
        ignore_doors: bool,
    ) -> Result<Option<RouteInfo>, PathError> {
        route::find_path(map, start, target, ignore_doors, &self.costs)
    }

    /// Like [`find_path`](Self::find_path), but treats the target tile as
    /// empty for the duration of the search. The map is left exactly as it
    /// was on return.
    pub fn find_path_to_occupied<M: TileMapMut + ?Sized>(
        &self,
        map: &mut M,
        start: Coord,
        target: Coord,
        ignore_doors: bool,
    ) -> Result<Option<RouteInfo>, PathError> {
        route::find_path_to_occupied(map, start, target, ignore_doors, &self.costs)
    }

    /// Price of `route` on the current map, start tile included.
    pub fn calculate_cost<M: TileMap + ?Sized>(&self, route: &RouteInfo, map: &M) -> f64 {
        validate::calculate_cost(route, map, &self.costs)
    }

    /// Whether `path` can still be walked within `budget` on the current map.
    pub fn is_path_valid<M: TileMap + ?Sized>(&self, map: &M, budget: f64, path: &[Coord]) -> bool {
        validate::is_path_valid(map, budget, path, &self.costs)
    }
}
