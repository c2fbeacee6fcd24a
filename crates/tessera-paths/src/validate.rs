//! Re-pricing and re-validating routes against the live grid.
//!
//! Routes are computed against a snapshot; by the time a move is committed
//! doors may have been toggled and actors may have moved. These checks read
//! the grid again tile by tile instead of trusting the graph the route came
//! from.

use tessera_grid::{Coord, TileMap};

use crate::costs::MoveCosts;
use crate::dijkstra::within_budget;
use crate::neighbors::manhattan;
use crate::route::RouteInfo;

pub(crate) fn calculate_cost<M: TileMap + ?Sized>(
    route: &RouteInfo,
    map: &M,
    costs: &MoveCosts,
) -> f64 {
    route
        .path
        .iter()
        .map(|&c| {
            let Some(tile) = map.tile(c) else {
                return 0.0;
            };
            if route.doors.contains(&c) {
                return costs.closed_door;
            }
            // A wall inside a route should not happen; it adds nothing.
            costs.entry_cost(tile.terrain, false).unwrap_or(0.0)
        })
        .sum()
}

pub(crate) fn is_path_valid<M: TileMap + ?Sized>(
    map: &M,
    budget: f64,
    path: &[Coord],
    costs: &MoveCosts,
) -> bool {
    let Some((&first, rest)) = path.split_first() else {
        log::debug!("rejecting empty path");
        return false;
    };
    if rest.is_empty() {
        return true;
    }
    if budget.is_nan() || budget < 0.0 {
        log::debug!("rejecting path from {first}: invalid budget {budget}");
        return false;
    }

    let mut prev = first;
    let mut spent = 0.0;
    for &c in rest {
        if manhattan(prev, c) != 1 {
            log::debug!("rejecting path from {first}: {prev} -> {c} is not a single step");
            return false;
        }
        let Some(tile) = map.tile(c) else {
            log::debug!("rejecting path from {first}: {c} is off the grid");
            return false;
        };
        if tile.occupant.is_some() {
            log::debug!("rejecting path from {first}: {c} is occupied");
            return false;
        }
        let Some(cost) = costs.entry_cost(tile.terrain, false) else {
            log::debug!("rejecting path from {first}: {c} is a wall");
            return false;
        };
        spent += cost;
        prev = c;
    }

    if !within_budget(spent, budget) {
        log::debug!("rejecting path from {first}: costs {spent}, budget {budget}");
        return false;
    }
    true
}
