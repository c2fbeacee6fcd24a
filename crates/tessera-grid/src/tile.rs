//! Terrain kinds and tile contents.

use std::fmt;

/// Tile category. Determines what it costs to step onto a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    #[default]
    Open,
    /// Rough ground, water and the like.
    Difficult,
    /// Ice. Nearly free to cross.
    Slippery,
    OpenDoor,
    ClosedDoor,
    Wall,
}

impl Terrain {
    /// Every terrain kind, in declaration order.
    pub const ALL: [Terrain; 6] = [
        Terrain::Open,
        Terrain::Difficult,
        Terrain::Slippery,
        Terrain::OpenDoor,
        Terrain::ClosedDoor,
        Terrain::Wall,
    ];

    #[inline]
    pub fn is_wall(self) -> bool {
        self == Terrain::Wall
    }

    /// ASCII glyph used by [`Grid::parse`](crate::Grid::parse) and
    /// [`Grid::render`](crate::Grid::render).
    pub fn glyph(self) -> char {
        match self {
            Terrain::Open => '.',
            Terrain::Difficult => '~',
            Terrain::Slippery => '*',
            Terrain::OpenDoor => '/',
            Terrain::ClosedDoor => '+',
            Terrain::Wall => '#',
        }
    }

    /// Inverse of [`glyph`](Self::glyph).
    pub fn from_glyph(ch: char) -> Option<Terrain> {
        Terrain::ALL.into_iter().find(|t| t.glyph() == ch)
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Terrain::Open => "open",
            Terrain::Difficult => "difficult",
            Terrain::Slippery => "slippery",
            Terrain::OpenDoor => "open door",
            Terrain::ClosedDoor => "closed door",
            Terrain::Wall => "wall",
        };
        f.write_str(name)
    }
}

/// Identifier of an actor (player or AI unit) standing on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u32);

/// Identifier of an item type lying on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemKind(pub u32);

/// Contents of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub terrain: Terrain,
    pub occupant: Option<ActorId>,
    pub item: Option<ItemKind>,
}

impl Tile {
    /// An empty tile of the given terrain.
    pub const fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            occupant: None,
            item: None,
        }
    }

    pub const fn with_occupant(mut self, actor: ActorId) -> Self {
        self.occupant = Some(actor);
        self
    }

    pub const fn with_item(mut self, item: ItemKind) -> Self {
        self.item = Some(item);
        self
    }

    /// Not a wall and nobody standing on it.
    #[inline]
    pub fn is_traversable(&self) -> bool {
        !self.terrain.is_wall() && self.occupant.is_none()
    }
}

impl From<Terrain> for Tile {
    fn from(t: Terrain) -> Self {
        Tile::new(t)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn tile_round_trip() {
        let tile = Tile::new(Terrain::Slippery)
            .with_occupant(ActorId(7))
            .with_item(ItemKind(2));
        let json = serde_json::to_string(&tile).unwrap();
        let back: Tile = serde_json::from_str(&json).unwrap();
        assert_eq!(tile, back);
    }
}
