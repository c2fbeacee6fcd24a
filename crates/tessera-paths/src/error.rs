use tessera_grid::{Coord, Range, Terrain};
use thiserror::Error;

/// Caller misuse detected by the engine.
///
/// Running out of movement or finding no route are ordinary outcomes and are
/// reported through the return values, never through this type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("start {at} is outside the grid {bounds}")]
    OutOfBounds { at: Coord, bounds: Range },
    #[error("start {0} is a wall")]
    StartBlocked(Coord),
    #[error("grid reports no tile at {0} although it lies inside its bounds")]
    InconsistentGrid(Coord),
    #[error("movement budget must be a non-negative number, got {0}")]
    InvalidBudget(f64),
    #[error("entry cost for {terrain} must be finite and positive, got {value}")]
    InvalidCost { terrain: Terrain, value: f64 },
}
