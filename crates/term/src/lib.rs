//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the board view draws a
//! [`core::GameSnapshot`](crate::core::GameSnapshot) into a framebuffer of
//! styled cells, and the renderer flushes that framebuffer to the terminal,
//! re-emitting only the cells that changed since the previous frame.
//!
//! The view also owns the cell ↔ board-point mapping, which the input layer
//! needs to turn a mouse click into a selection.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use mahjong_core as core;
pub use mahjong_types as types;

pub use fb::{BoxGlyphs, Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{BoardLayout, GameView, Viewport, UNITS_PER_COL, UNITS_PER_ROW};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
