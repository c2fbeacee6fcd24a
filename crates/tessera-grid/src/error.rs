use thiserror::Error;

use crate::geom::{Coord, Range};
use crate::tile::Terrain;

/// Errors raised while building or mutating a [`Grid`](crate::Grid).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid has no tiles")]
    Empty,
    #[error("row {row} has {found} tiles, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("grid bounds {bounds} hold {expected} tiles, found {found}")]
    TileCount {
        bounds: Range,
        expected: usize,
        found: usize,
    },
    #[error("grid bounds must start at the origin, got {0}")]
    Origin(Coord),
    #[error("unknown terrain glyph {ch:?} at {at}")]
    UnknownGlyph { ch: char, at: Coord },
    #[error("coordinate {0} is outside the grid")]
    OutOfBounds(Coord),
    #[error("tile {at} is {terrain}, not a door")]
    NotADoor { at: Coord, terrain: Terrain },
    #[error("tile {0} has no occupant")]
    NoOccupant(Coord),
    #[error("tile {0} is blocked")]
    Blocked(Coord),
    #[error("invalid coordinate key {0:?}, expected \"x,y\"")]
    InvalidKey(String),
}
