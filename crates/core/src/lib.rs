//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the board/tile engine of a Mahjong Solitaire game: the
//! geometry of layered tiles, the rules that decide which tiles may be picked,
//! the pair-matching state machine and layout generation. It does no I/O;
//! the only side channel is the `log` facade.
//!
//! - **Deterministic**: the same seed deals the same board
//! - **Testable**: every rule has unit tests next to it
//! - **Portable**: runs in a terminal, a GUI or headless
//!
//! # Module Structure
//!
//! - [`tile`]: a single tile, its projected footprint and the cover test
//! - [`board`]: the live tile arena, selection, matching and click picking
//! - [`layout`]: template catalog, deals and the guaranteed-winnable deal
//! - [`solver`]: search for a clearing sequence (backs the winnable deal)
//! - [`rng`]: seeded LCG and pair decks
//! - [`timer`]: play time with pause/resume
//! - [`game_state`]: the state machine tying everything together
//! - [`snapshot`]: render surface for one frame
//!
//! # Rules
//!
//! - A tile is hidden while a still-present tile on a strictly higher layer
//!   overlaps its projected footprint. Hidden tiles cannot be picked.
//! - Two picked tiles of the same kind are removed; any other pair only
//!   clears the selection.
//! - Clearing the board wins. Running out of selectable pairs loses.
//!
//! # Example
//!
//! ```
//! use mahjong_core::{layout_count, GameState};
//! use mahjong_types::{GameAction, GameStatus};
//!
//! // The last layout index is the guaranteed-winnable deal
//! let mut game = GameState::with_layout(12345, layout_count() - 1);
//! assert_eq!(game.status(), GameStatus::Playing);
//!
//! // Play the hinted pair
//! let (a, b) = game.hint().unwrap();
//! assert!(game.select(a));
//! assert!(game.select(b));
//! assert_eq!(game.board().remaining(), game.board().len() - 2);
//!
//! game.apply_action(GameAction::Restart);
//! assert_eq!(game.board().remaining(), game.board().len());
//! ```

pub mod board;
pub mod game_state;
pub mod layout;
pub mod rng;
pub mod snapshot;
pub mod solver;
pub mod tile;
pub mod timer;

pub use mahjong_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Selection};
pub use game_state::GameState;
pub use layout::{generate, layout_count, next_layout_index, LayoutSource, LayoutTemplate};
pub use rng::SimpleRng;
pub use snapshot::{GameSnapshot, TileView};
pub use solver::{solve, Solvability};
pub use tile::Tile;
pub use timer::{format_mm_ss, Timer};
