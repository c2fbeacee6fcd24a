//! Movement and pathfinding for turn-based tile games.
//!
//! One implementation serves both the authoritative server and the client
//! preview, so both sides agree on what a move costs:
//!
//! - **Reachability** within a movement budget ([`find_reachable`])
//! - **Shortest path** between two tiles, optionally walking through closed
//!   doors ([`find_path`], [`find_path_to_occupied`])
//! - **Re-pricing** and **re-validation** of a previously computed route
//!   against the live grid ([`calculate_cost`], [`is_path_valid`])
//!
//! Every query builds a fresh [`Graph`] from the grid it is given; nothing is
//! cached between calls, because doors, items and actors change every turn.
//!
//! # Costs
//!
//! | Terrain | Entry cost |
//! |---|---|
//! | Open | 1 |
//! | Difficult | 2 |
//! | Slippery | 0.0001 |
//! | Open door | 1 |
//! | Closed door | 6 (1 when ignoring doors) |
//! | Wall | impassable |
//!
//! Budgets are compared after flooring both sides, so a few slippery steps
//! never push an integer budget over its limit. Use [`MoveEngine`] for a
//! different cost table; the free functions use [`MoveCosts::default`].

mod costs;
mod dijkstra;
mod engine;
mod error;
mod graph;
mod neighbors;
mod reachable;
mod route;
mod validate;

pub use costs::{CLOSED_DOOR_COST, MoveCosts, SLIPPERY_COST};
pub use engine::MoveEngine;
pub use error::PathError;
pub use graph::{Graph, Node, NodeId};
pub use neighbors::{Neighbors, manhattan};
pub use reachable::Reachable;
pub use route::RouteInfo;

use tessera_grid::{Coord, TileMap, TileMapMut};

/// Every tile reachable from `start` within `budget`, with default costs.
pub fn find_reachable<M: TileMap + ?Sized>(
    map: &M,
    budget: f64,
    start: Coord,
) -> Result<Reachable, PathError> {
    MoveEngine::default().find_reachable(map, budget, start)
}

/// Cheapest route from `start` to `target`, with default costs.
pub fn find_path<M: TileMap + ?Sized>(
    map: &M,
    start: Coord,
    target: Coord,
    ignore_doors: bool,
) -> Result<Option<RouteInfo>, PathError> {
    MoveEngine::default().find_path(map, start, target, ignore_doors)
}

/// Cheapest route to a tile someone is standing on, with default costs.
pub fn find_path_to_occupied<M: TileMapMut + ?Sized>(
    map: &mut M,
    start: Coord,
    target: Coord,
    ignore_doors: bool,
) -> Result<Option<RouteInfo>, PathError> {
    MoveEngine::default().find_path_to_occupied(map, start, target, ignore_doors)
}

/// Price of `route` on the current map, with default costs.
pub fn calculate_cost<M: TileMap + ?Sized>(route: &RouteInfo, map: &M) -> f64 {
    MoveEngine::default().calculate_cost(route, map)
}

/// Whether `path` is still walkable within `budget`, with default costs.
pub fn is_path_valid<M: TileMap + ?Sized>(map: &M, budget: f64, path: &[Coord]) -> bool {
    MoveEngine::default().is_path_valid(map, budget, path)
}
