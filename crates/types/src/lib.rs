//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, layout files, terminal rendering).
//!
//! # Board Geometry
//!
//! Tiles live on a 2D board plane measured in abstract units. Every tile has the
//! same footprint; layering is expressed by shifting the projected footprint
//! up-and-left by [`LAYER_OFFSET`] units per layer:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TILE_WIDTH` | 60 | Footprint width in board units |
//! | `TILE_HEIGHT` | 80 | Footprint height in board units |
//! | `LAYER_OFFSET` | 5 | Projected shift per layer, both axes |
//!
//! # Deal Constants
//!
//! A full deal holds [`TILE_KINDS`] kinds with [`COPIES_PER_KIND`] copies each,
//! i.e. [`FULL_DEAL_TILES`] tiles.
//!
//! # Examples
//!
//! ```
//! use mahjong_types::{GameAction, GameStatus, TileRect, FULL_DEAL_TILES};
//!
//! let action = GameAction::from_str("nextLayout").unwrap();
//! assert_eq!(action, GameAction::NextLayout);
//!
//! let rect = TileRect::new(0, 0, 60, 80);
//! assert!(rect.contains(59, 79));
//! assert!(!rect.contains(60, 0));
//!
//! assert!(GameStatus::Playing.is_playing());
//! assert_eq!(FULL_DEAL_TILES, 36);
//! ```

use std::time::Duration;

/// Footprint width of a tile in board units.
pub const TILE_WIDTH: i32 = 60;

/// Footprint height of a tile in board units.
pub const TILE_HEIGHT: i32 = 80;

/// Projected up-and-left shift applied per layer (board units).
pub const LAYER_OFFSET: i32 = 5;

/// Number of distinct tile kinds in a generated deal (kinds are `1..=TILE_KINDS`).
pub const TILE_KINDS: u8 = 18;

/// Copies of each kind in a generated deal.
pub const COPIES_PER_KIND: usize = 2;

/// Tiles in a full generated deal.
pub const FULL_DEAL_TILES: usize = TILE_KINDS as usize * COPIES_PER_KIND;

/// Largest absolute value a layout file may use for `x`, `y` or `z`.
///
/// Projected coordinates of in-range tiles stay far from `i32` limits.
pub const MAX_COORD: i32 = 1_000_000;

/// Frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Matching category of a tile. Two tiles match iff their kinds are equal.
pub type TileKind = u8;

/// Stable handle of a tile inside one board.
///
/// Handles are indices into the board's tile arena. Tiles are never removed
/// from the arena (matched tiles are only flagged), so a handle stays valid for
/// the lifetime of the board it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub usize);

impl TileId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Raw layout record: one tile's kind and board-plane placement.
///
/// This is the unit of the layout file format (`kind,x,y,z`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TilePlacement {
    pub kind: TileKind,
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl TilePlacement {
    pub const fn new(kind: TileKind, x: i32, y: i32, z: i32) -> Self {
        Self { kind, x, y, z }
    }
}

/// Axis-aligned rectangle in board units (projected tile footprint).
///
/// Containment is half-open: the left/top edges are inside, the right/bottom
/// edges are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl TileRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Check if a board point lies inside the rectangle
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Smallest rectangle covering both `self` and `other`
    pub fn union(&self, other: &TileRect) -> TileRect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        TileRect::new(
            x,
            y,
            self.right().max(other.right()).saturating_sub(x),
            self.bottom().max(other.bottom()).saturating_sub(y),
        )
    }
}

/// Engine state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Tiles can be selected and matched.
    Playing,
    /// Terminal state. `win` is true when every tile was cleared.
    GameOver { win: bool },
}

impl GameStatus {
    pub fn is_playing(&self) -> bool {
        matches!(self, GameStatus::Playing)
    }

    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::GameOver { .. })
    }

    pub fn is_won(&self) -> bool {
        matches!(self, GameStatus::GameOver { win: true })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Playing => "playing",
            GameStatus::GameOver { win: true } => "won",
            GameStatus::GameOver { win: false } => "lost",
        }
    }
}

/// Semantic actions consumed by the engine.
///
/// A surrounding input layer translates raw device events (keys, mouse) into
/// these. Quitting is not an engine concern and has no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Pointer-down at a board-plane position
    Select { x: i32, y: i32 },
    /// Deal the current layout again
    Restart,
    /// Deal the next layout in the catalog
    NextLayout,
    /// Write the live board to the attached layout file (editor only)
    SaveLayout,
    /// Toggle pause state
    Pause,
}

impl GameAction {
    /// Parse a keyboard-style action from string
    ///
    /// `Select` carries a position and cannot be parsed from a bare name.
    ///
    /// # Examples
    ///
    /// ```
    /// use mahjong_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("restart"), Some(GameAction::Restart));
    /// assert_eq!(GameAction::from_str("saveLayout"), Some(GameAction::SaveLayout));
    /// assert_eq!(GameAction::from_str("select"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "restart" => Some(GameAction::Restart),
            "nextlayout" => Some(GameAction::NextLayout),
            "savelayout" => Some(GameAction::SaveLayout),
            "pause" => Some(GameAction::Pause),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Select { .. } => "select",
            GameAction::Restart => "restart",
            GameAction::NextLayout => "nextLayout",
            GameAction::SaveLayout => "saveLayout",
            GameAction::Pause => "pause",
        }
    }
}

/// Core-side event emitted after a state-changing selection.
///
/// The engine stays free of I/O; observers (the session) consume these to
/// persist records or log outcomes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoreEvent {
    Selected {
        tile: TileId,
    },
    Deselected {
        tile: TileId,
    },
    Matched {
        first: TileId,
        second: TileId,
        kind: TileKind,
    },
    Mismatched {
        first: TileId,
        second: TileId,
    },
    /// Last pair cleared. `new_best` is set when `elapsed` replaced the best time.
    Won {
        elapsed: Duration,
        new_best: bool,
    },
    /// No selectable pair remains.
    Lost,
}
