//! **tessera-grid**: the tile grid model of a turn-based tactics game.
//!
//! This crate provides the coordinates, terrain kinds and grid storage shared
//! by the game server, the client preview and the pathfinding engine in
//! `tessera-paths`. The engine reads grids through the [`TileMap`] trait and
//! never mutates them, except for the scoped occupant swap exposed by
//! [`TileMapMut`].

pub mod error;
pub mod geom;
pub mod grid;
pub mod tile;

pub use error::GridError;
pub use geom::{Coord, Range, RangeIter};
pub use grid::{Grid, TileMap, TileMapMut};
pub use tile::{ActorId, ItemKind, Terrain, Tile};
