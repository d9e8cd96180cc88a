//! Tile module - a single board piece and its overlap geometry
//!
//! Coordinates: `(x, y)` is the tile's position on the board plane and `z` its
//! layer. A tile's *projected* footprint is shifted up-and-left by
//! `z * LAYER_OFFSET` on both axes, so higher tiles visually sit on top of the
//! ones below. All overlap tests work on projected footprints.
//!
//! Projection saturates at the `i32` limits, so any coordinates are safe to
//! query; layout files keep them within [`MAX_COORD`](crate::types::MAX_COORD).

use crate::types::{TileKind, TilePlacement, TileRect, LAYER_OFFSET, TILE_HEIGHT, TILE_WIDTH};

/// A tile on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub kind: TileKind,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub(crate) selected: bool,
    pub(crate) removed: bool,
}

impl Tile {
    /// Create a tile at the given board position and layer
    pub fn new(kind: TileKind, x: i32, y: i32, z: i32) -> Self {
        Self {
            kind,
            x,
            y,
            z,
            selected: false,
            removed: false,
        }
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub fn removed(&self) -> bool {
        self.removed
    }

    /// Projected x coordinate (layer offset applied)
    #[inline(always)]
    pub fn screen_x(&self) -> i32 {
        self.x.saturating_sub(self.z.saturating_mul(LAYER_OFFSET))
    }

    /// Projected y coordinate (layer offset applied)
    #[inline(always)]
    pub fn screen_y(&self) -> i32 {
        self.y.saturating_sub(self.z.saturating_mul(LAYER_OFFSET))
    }

    /// Projected footprint, used for both hit-testing and rendering
    pub fn rect(&self) -> TileRect {
        TileRect::new(self.screen_x(), self.screen_y(), TILE_WIDTH, TILE_HEIGHT)
    }

    /// Check if a board point hits this tile's projected footprint
    pub fn contains_point(&self, px: i32, py: i32) -> bool {
        self.rect().contains(px, py)
    }

    /// Check if the projected footprints of two tiles overlap
    #[inline(always)]
    pub fn overlaps(&self, other: &Tile) -> bool {
        let dx = i64::from(other.screen_x()) - i64::from(self.screen_x());
        let dy = i64::from(other.screen_y()) - i64::from(self.screen_y());
        dx.abs() < i64::from(TILE_WIDTH) && dy.abs() < i64::from(TILE_HEIGHT)
    }

    /// Check if `other` hides this tile: it is still on the board, sits on a
    /// strictly higher layer and its footprint overlaps ours.
    ///
    /// A removed tile is never covered.
    pub fn is_covered_by(&self, other: &Tile) -> bool {
        if self.removed || other.removed {
            return false;
        }
        other.z > self.z && self.overlaps(other)
    }

    /// Check if any tile in `tiles` covers this one.
    ///
    /// `tiles` may contain this tile itself; a tile never covers itself since
    /// covering requires a strictly higher layer.
    pub fn is_covered(&self, tiles: &[Tile]) -> bool {
        tiles.iter().any(|other| self.is_covered_by(other))
    }

    /// Selectability gate: is any higher, still-present tile lying on top of
    /// this one?
    ///
    /// Blocking uses the same footprint overlap as covering. The two names are
    /// kept apart because callers ask different questions ("is it hidden" vs
    /// "may it be picked").
    pub fn is_blocked_by_neighbors(&self, tiles: &[Tile]) -> bool {
        self.is_covered(tiles)
    }

    /// Check if this tile may be picked right now
    pub fn is_selectable(&self, tiles: &[Tile]) -> bool {
        !self.removed && !self.is_covered(tiles) && !self.is_blocked_by_neighbors(tiles)
    }

    /// Raw layout record for this tile
    pub fn placement(&self) -> TilePlacement {
        TilePlacement::new(self.kind, self.x, self.y, self.z)
    }
}

impl From<TilePlacement> for Tile {
    fn from(p: TilePlacement) -> Self {
        Tile::new(p.kind, p.x, p.y, p.z)
    }
}
