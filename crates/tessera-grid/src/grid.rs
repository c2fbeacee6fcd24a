//! The [`Grid`] type and the [`TileMap`] read interface consumed by the
//! pathfinding engine.
//!
//! Unlike a shared view, a `Grid` owns its tiles outright: a clone is an
//! independent snapshot that can be handed to a solver on another thread
//! while the game keeps mutating the original.

use crate::error::GridError;
use crate::geom::{Coord, Range};
use crate::tile::{ActorId, ItemKind, Terrain, Tile};

/// Read-only access to tiles by coordinate.
pub trait TileMap {
    /// Rectangle covered by the map.
    fn bounds(&self) -> Range;

    /// Tile at `c`, or `None` if `c` is outside [`bounds`](Self::bounds).
    fn tile(&self, c: Coord) -> Option<&Tile>;
}

/// Occupant mutation, for callers that briefly need to ignore an actor.
pub trait TileMapMut: TileMap {
    /// Replace the occupant at `c`, returning the previous one. Does nothing
    /// and returns `None` if `c` is out of bounds.
    fn replace_occupant(&mut self, c: Coord, occupant: Option<ActorId>) -> Option<ActorId>;
}

/// A rectangular, row-major grid of [`Tile`]s with its origin at (0, 0).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridRepr"))]
pub struct Grid {
    tiles: Vec<Tile>,
    bounds: Range,
}

/// Unchecked serialized form of a [`Grid`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridRepr {
    tiles: Vec<Tile>,
    bounds: Range,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(repr: GridRepr) -> Result<Self, GridError> {
        let GridRepr { tiles, bounds } = repr;
        if bounds.min != Coord::ZERO {
            return Err(GridError::Origin(bounds.min));
        }
        if bounds.is_empty() {
            return Err(GridError::Empty);
        }
        if tiles.len() != bounds.len() {
            return Err(GridError::TileCount {
                bounds,
                expected: bounds.len(),
                found: tiles.len(),
            });
        }
        Ok(Self { tiles, bounds })
    }
}

impl Grid {
    /// Create a grid filled with empty Open tiles. Negative sizes clamp to 0.
    pub fn new(width: i32, height: i32) -> Self {
        Self::filled(width, height, Tile::default())
    }

    /// Create a grid filled with copies of `tile`.
    pub fn filled(width: i32, height: i32, tile: Tile) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        Self {
            tiles: vec![tile; bounds.len()],
            bounds,
        }
    }

    /// Build a grid from rows of tiles. Every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Result<Self, GridError> {
        let expected = rows.first().map(Vec::len).unwrap_or(0);
        if expected == 0 {
            return Err(GridError::Empty);
        }
        let height = rows.len();
        let mut tiles = Vec::with_capacity(expected * height);
        for (row, r) in rows.into_iter().enumerate() {
            if r.len() != expected {
                return Err(GridError::Ragged {
                    row,
                    expected,
                    found: r.len(),
                });
            }
            tiles.extend(r);
        }
        Ok(Self {
            tiles,
            bounds: Range::new(0, 0, expected as i32, height as i32),
        })
    }

    /// Parse an ASCII map.
    ///
    /// Terrain glyphs are those of [`Terrain::glyph`]. A digit `0`–`9` is an
    /// Open tile occupied by the actor with that id, and `$` is an Open tile
    /// holding `ItemKind(0)`. Surrounding whitespace on each line is ignored.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        let mut rows = Vec::new();
        for (y, line) in s.trim().lines().enumerate() {
            let mut row = Vec::new();
            for (x, ch) in line.trim().chars().enumerate() {
                let tile = match ch {
                    '0'..='9' => Tile::new(Terrain::Open)
                        .with_occupant(ActorId(ch.to_digit(10).unwrap_or_default())),
                    '$' => Tile::new(Terrain::Open).with_item(ItemKind(0)),
                    _ => Terrain::from_glyph(ch).map(Tile::new).ok_or(
                        GridError::UnknownGlyph {
                            ch,
                            at: Coord::new(x as i32, y as i32),
                        },
                    )?,
                };
                row.push(tile);
            }
            rows.push(row);
        }
        Self::from_rows(rows)
    }

    /// Render back to the ASCII form accepted by [`parse`](Self::parse).
    /// Occupants with ids above 9 are drawn as `@`.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.tiles.len() + self.height() as usize);
        for c in self.bounds.iter() {
            if c.x == 0 && c.y > 0 {
                out.push('\n');
            }
            let t = &self.tiles[self.index(c)];
            let ch = match (t.occupant, t.item) {
                (Some(ActorId(id)), _) => char::from_digit(id, 10).unwrap_or('@'),
                (None, Some(_)) => '$',
                (None, None) => t.terrain.glyph(),
            };
            out.push(ch);
        }
        out
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        self.bounds.contains(c)
    }

    #[inline]
    fn index(&self, c: Coord) -> usize {
        (c.y * self.bounds.width() + c.x) as usize
    }

    /// Tile at `c`, or `None` if out of bounds.
    pub fn at(&self, c: Coord) -> Option<&Tile> {
        if !self.contains(c) {
            return None;
        }
        Some(&self.tiles[self.index(c)])
    }

    fn at_mut(&mut self, c: Coord) -> Result<&mut Tile, GridError> {
        if !self.contains(c) {
            return Err(GridError::OutOfBounds(c));
        }
        let i = self.index(c);
        Ok(&mut self.tiles[i])
    }

    /// Replace the whole tile at `c`.
    pub fn set(&mut self, c: Coord, tile: Tile) -> Result<(), GridError> {
        *self.at_mut(c)? = tile;
        Ok(())
    }

    pub fn set_terrain(&mut self, c: Coord, terrain: Terrain) -> Result<(), GridError> {
        self.at_mut(c)?.terrain = terrain;
        Ok(())
    }

    pub fn set_occupant(&mut self, c: Coord, actor: ActorId) -> Result<(), GridError> {
        self.at_mut(c)?.occupant = Some(actor);
        Ok(())
    }

    /// Remove and return the occupant at `c`.
    pub fn clear_occupant(&mut self, c: Coord) -> Result<Option<ActorId>, GridError> {
        Ok(self.at_mut(c)?.occupant.take())
    }

    /// Place an item at `c`, returning whatever item was there before.
    pub fn place_item(&mut self, c: Coord, item: ItemKind) -> Result<Option<ItemKind>, GridError> {
        Ok(self.at_mut(c)?.item.replace(item))
    }

    /// Pick up the item at `c`.
    pub fn take_item(&mut self, c: Coord) -> Result<Option<ItemKind>, GridError> {
        Ok(self.at_mut(c)?.item.take())
    }

    /// Open a closed door or close an open one, returning the new terrain.
    pub fn toggle_door(&mut self, c: Coord) -> Result<Terrain, GridError> {
        let tile = self.at_mut(c)?;
        tile.terrain = match tile.terrain {
            Terrain::OpenDoor => Terrain::ClosedDoor,
            Terrain::ClosedDoor => Terrain::OpenDoor,
            terrain => return Err(GridError::NotADoor { at: c, terrain }),
        };
        Ok(tile.terrain)
    }

    /// Move the occupant of `from` onto `to`.
    ///
    /// `to` must be a non-wall tile with no occupant. This is a single-step
    /// commit; it does not check adjacency or movement cost.
    pub fn move_occupant(&mut self, from: Coord, to: Coord) -> Result<ActorId, GridError> {
        let target = *self.at(to).ok_or(GridError::OutOfBounds(to))?;
        if !target.is_traversable() {
            return Err(GridError::Blocked(to));
        }
        let actor = self
            .at_mut(from)?
            .occupant
            .take()
            .ok_or(GridError::NoOccupant(from))?;
        self.at_mut(to)?.occupant = Some(actor);
        Ok(actor)
    }

    /// Where `actor` currently stands, if anywhere.
    pub fn find_occupant(&self, actor: ActorId) -> Option<Coord> {
        self.iter()
            .find(|(_, t)| t.occupant == Some(actor))
            .map(|(c, _)| c)
    }

    /// Row-major iterator over `(Coord, &Tile)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Tile)> + '_ {
        self.bounds.iter().zip(self.tiles.iter())
    }
}

impl TileMap for Grid {
    #[inline]
    fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    fn tile(&self, c: Coord) -> Option<&Tile> {
        self.at(c)
    }
}

impl TileMapMut for Grid {
    fn replace_occupant(&mut self, c: Coord, occupant: Option<ActorId>) -> Option<ActorId> {
        match self.at_mut(c) {
            Ok(tile) => std::mem::replace(&mut tile.occupant, occupant),
            Err(_) => None,
        }
    }
}
