//! Terrain entry costs.

use tessera_grid::Terrain;

use crate::error::PathError;

/// Default cost of stepping onto a slippery tile. Strictly positive so that
/// every step still makes progress and free moves still order predictably.
pub const SLIPPERY_COST: f64 = 0.0001;

/// Default cost of stepping onto a closed door (opening it on the way).
pub const CLOSED_DOOR_COST: f64 = 6.0;

/// Movement points needed to enter each kind of terrain.
///
/// Walls have no entry cost: they are never part of a search graph.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MoveCosts {
    pub open: f64,
    pub difficult: f64,
    pub slippery: f64,
    pub open_door: f64,
    pub closed_door: f64,
    /// Price of a closed door when a query ignores doors, i.e. plans to walk
    /// through one it intends to open first.
    pub ignored_door: f64,
}

impl Default for MoveCosts {
    fn default() -> Self {
        Self {
            open: 1.0,
            difficult: 2.0,
            slippery: SLIPPERY_COST,
            open_door: 1.0,
            closed_door: CLOSED_DOOR_COST,
            ignored_door: 1.0,
        }
    }
}

impl MoveCosts {
    /// Entry cost of `terrain`, or `None` for walls.
    #[inline]
    pub fn entry_cost(&self, terrain: Terrain, ignore_doors: bool) -> Option<f64> {
        let cost = match terrain {
            Terrain::Open => self.open,
            Terrain::Difficult => self.difficult,
            Terrain::Slippery => self.slippery,
            Terrain::OpenDoor => self.open_door,
            Terrain::ClosedDoor if ignore_doors => self.ignored_door,
            Terrain::ClosedDoor => self.closed_door,
            Terrain::Wall => return None,
        };
        Some(cost)
    }

    /// Reject tables the solvers cannot terminate on.
    pub fn validate(&self) -> Result<(), PathError> {
        let entries = [
            (Terrain::Open, self.open),
            (Terrain::Difficult, self.difficult),
            (Terrain::Slippery, self.slippery),
            (Terrain::OpenDoor, self.open_door),
            (Terrain::ClosedDoor, self.closed_door),
            (Terrain::ClosedDoor, self.ignored_door),
        ];
        for (terrain, value) in entries {
            if !value.is_finite() || value <= 0.0 {
                return Err(PathError::InvalidCost { terrain, value });
            }
        }
        Ok(())
    }
}
