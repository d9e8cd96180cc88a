//! Board module - the live set of tiles and the pair-matching rules
//!
//! Tiles are stored in an arena (`Vec<Tile>`) and addressed by [`TileId`]
//! handles. Matched tiles stay in the arena with their `removed` flag set, so
//! handles never dangle while the board lives. A board is discarded wholesale
//! on reset; tiles never migrate between boards.

use crate::tile::Tile;
use crate::types::{TileId, TileKind, TilePlacement, TileRect};

/// Number of count slots needed to tally any tile kind
const KIND_SLOTS: usize = TileKind::MAX as usize + 1;

/// Result of selecting a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Tile was removed, hidden, unknown or otherwise not pickable
    Ignored,
    /// Tile became the current selection
    Selected(TileId),
    /// The current selection was picked again and cleared
    Deselected(TileId),
    /// Second tile matched the first; both are removed
    Matched(TileId, TileId),
    /// Second tile did not match; selection cleared, nothing removed
    Mismatched(TileId, TileId),
}

/// The tiles of one deal plus the current selection
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Board {
    tiles: Vec<Tile>,
    selected: Option<TileId>,
}

impl Board {
    /// Create a board owning the given tiles (selection and removal flags cleared)
    pub fn new(tiles: Vec<Tile>) -> Self {
        let tiles = tiles
            .into_iter()
            .map(|t| Tile::new(t.kind, t.x, t.y, t.z))
            .collect();
        Self {
            tiles,
            selected: None,
        }
    }

    /// Create a board from raw layout records, keeping their order
    pub fn from_placements<I>(placements: I) -> Self
    where
        I: IntoIterator<Item = TilePlacement>,
    {
        Self::new(placements.into_iter().map(Tile::from).collect())
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    /// Handles of every tile on the board, removed ones included
    pub fn ids(&self) -> impl Iterator<Item = TileId> + '_ {
        (0..self.tiles.len()).map(TileId)
    }

    pub fn selected(&self) -> Option<TileId> {
        self.selected
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Number of tiles still on the board
    pub fn remaining(&self) -> usize {
        self.tiles.iter().filter(|t| !t.removed).count()
    }

    /// Check if every tile has been matched away
    pub fn is_cleared(&self) -> bool {
        self.tiles.iter().all(|t| t.removed)
    }

    /// Raw layout records of every tile, in board order
    pub fn placements(&self) -> Vec<TilePlacement> {
        self.tiles.iter().map(Tile::placement).collect()
    }

    /// Bounding rectangle of every tile's projected footprint, removed ones
    /// included, so the frame does not shift while the board empties
    pub fn bounds(&self) -> Option<TileRect> {
        self.tiles
            .iter()
            .map(Tile::rect)
            .reduce(|acc, r| acc.union(&r))
    }

    /// Check if some higher tile hides the given tile
    pub fn is_covered(&self, id: TileId) -> bool {
        self.tile(id).is_some_and(|t| t.is_covered(&self.tiles))
    }

    /// Check if some higher tile blocks the given tile from being picked
    pub fn is_blocked(&self, id: TileId) -> bool {
        self.tile(id)
            .is_some_and(|t| t.is_blocked_by_neighbors(&self.tiles))
    }

    /// Check if the given tile may be picked right now
    pub fn is_selectable(&self, id: TileId) -> bool {
        self.tile(id).is_some_and(|t| t.is_selectable(&self.tiles))
    }

    /// Handles of every currently selectable tile
    pub fn selectable(&self) -> impl Iterator<Item = TileId> + '_ {
        self.ids().filter(move |&id| self.is_selectable(id))
    }

    /// Find the tile a pointer-down at `(px, py)` picks.
    ///
    /// Candidates are visited topmost first: greatest layer, then greatest
    /// `x + y` (the tile drawn later). The first candidate whose footprint
    /// contains the point and which is selectable wins; hidden tiles are
    /// skipped even when the point lies on them.
    pub fn pick_at(&self, px: i32, py: i32) -> Option<TileId> {
        let mut hits: Vec<TileId> = self
            .ids()
            .filter(|&id| {
                let t = &self.tiles[id.index()];
                !t.removed && t.contains_point(px, py)
            })
            .collect();

        hits.sort_by_key(|&id| {
            let t = &self.tiles[id.index()];
            (
                std::cmp::Reverse(t.z),
                std::cmp::Reverse(i64::from(t.x) + i64::from(t.y)),
            )
        });

        hits.into_iter().find(|&id| self.is_selectable(id))
    }

    /// Tally selectable tiles per kind
    fn selectable_counts(&self) -> [u16; KIND_SLOTS] {
        let mut counts = [0u16; KIND_SLOTS];
        for id in self.selectable() {
            let kind = self.tiles[id.index()].kind as usize;
            counts[kind] = counts[kind].saturating_add(1);
        }
        counts
    }

    /// Check if at least one kind has two or more selectable tiles
    pub fn has_available_moves(&self) -> bool {
        self.selectable_counts().iter().any(|&c| c >= 2)
    }

    /// Number of distinct selectable matching pairs
    pub fn available_pair_count(&self) -> usize {
        self.selectable_counts()
            .iter()
            .map(|&c| {
                let c = c as usize;
                c * c.saturating_sub(1) / 2
            })
            .sum()
    }

    /// First selectable pair of equal kind, in board order
    pub fn find_pair(&self) -> Option<(TileId, TileId)> {
        let mut first_of_kind: [Option<TileId>; KIND_SLOTS] = [None; KIND_SLOTS];
        for id in self.selectable() {
            let kind = self.tiles[id.index()].kind as usize;
            match first_of_kind[kind] {
                Some(first) => return Some((first, id)),
                None => first_of_kind[kind] = Some(id),
            }
        }
        None
    }

    /// Select a tile, resolving a match if another tile is already selected.
    ///
    /// - No current selection: the tile becomes selected.
    /// - The tile is the current selection: it is deselected.
    /// - Another tile is selected: equal kinds remove both, unequal kinds
    ///   remove nothing. The selection is cleared either way.
    pub fn select(&mut self, id: TileId) -> Selection {
        if !self.is_selectable(id) {
            return Selection::Ignored;
        }

        match self.selected {
            None => {
                self.tiles[id.index()].selected = true;
                self.selected = Some(id);
                Selection::Selected(id)
            }
            Some(current) if current == id => {
                self.clear_selection();
                Selection::Deselected(id)
            }
            Some(current) => {
                let matched = self.tiles[current.index()].kind == self.tiles[id.index()].kind;
                self.clear_selection();
                if matched {
                    self.tiles[current.index()].removed = true;
                    self.tiles[id.index()].removed = true;
                    Selection::Matched(current, id)
                } else {
                    Selection::Mismatched(current, id)
                }
            }
        }
    }

    /// Drop the current selection, if any
    pub fn clear_selection(&mut self) {
        if let Some(current) = self.selected.take() {
            if let Some(t) = self.tiles.get_mut(current.index()) {
                t.selected = false;
            }
        }
    }

    /// Flag a tile as removed without matching rules (layout generation only)
    pub(crate) fn lift(&mut self, id: TileId) {
        if let Some(t) = self.tiles.get_mut(id.index()) {
            t.removed = true;
            t.selected = false;
        }
    }

    pub(crate) fn set_kind(&mut self, id: TileId, kind: TileKind) {
        if let Some(t) = self.tiles.get_mut(id.index()) {
            t.kind = kind;
        }
    }

    /// Create from tiles that may already carry removed flags (for testing)
    #[cfg(test)]
    pub fn from_tiles_raw(tiles: Vec<Tile>) -> Self {
        Self {
            tiles,
            selected: None,
        }
    }
}
