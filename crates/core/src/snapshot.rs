//! Snapshot module - what a renderer needs to draw one frame
//!
//! Removed tiles are not part of a snapshot. Tiles are listed in paint order
//! (lowest layer first, then top-to-bottom, left-to-right) so a renderer can
//! draw them as-is and let later tiles overwrite earlier ones.

use std::time::Duration;

use crate::types::{GameStatus, TileId, TileKind, TileRect};

/// One visible tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileView {
    pub id: TileId,
    pub kind: TileKind,
    /// Projected footprint in board coordinates
    pub rect: TileRect,
    pub layer: i32,
    pub selected: bool,
    pub selectable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub tiles: Vec<TileView>,
    /// Footprint of the whole deal (removed tiles included)
    pub bounds: Option<TileRect>,
    pub status: GameStatus,
    pub paused: bool,
    pub elapsed: Duration,
    pub best_time: Duration,
    pub layout_index: usize,
    pub layout_name: &'static str,
    pub remaining: usize,
}

impl GameSnapshot {
    /// Reset every field, keeping the tile buffer's allocation
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.bounds = None;
        self.status = GameStatus::Playing;
        self.paused = false;
        self.elapsed = Duration::ZERO;
        self.best_time = Duration::ZERO;
        self.layout_index = 0;
        self.layout_name = "";
        self.remaining = 0;
    }

    /// Check if a selection would currently be accepted
    pub fn playable(&self) -> bool {
        self.status.is_playing() && !self.paused
    }

    pub fn has_best_time(&self) -> bool {
        !self.best_time.is_zero()
    }

    /// Topmost visible tile whose footprint contains the point (for hover)
    pub fn tile_at(&self, px: i32, py: i32) -> Option<&TileView> {
        self.tiles.iter().rev().find(|t| t.rect.contains(px, py))
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            tiles: Vec::new(),
            bounds: None,
            status: GameStatus::Playing,
            paused: false,
            elapsed: Duration::ZERO,
            best_time: Duration::ZERO,
            layout_index: 0,
            layout_name: "",
            remaining: 0,
        }
    }
}
