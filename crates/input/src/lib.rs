//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key and mouse events into [`crate::types::GameAction`].
//! Mouse positions arrive as terminal cells; turning a cell into a board
//! position is the view's job, so the mouse mapper takes that conversion as a
//! closure and stays independent of any layout.

pub mod map;

pub use mahjong_types as types;

pub use map::{handle_key_event, handle_mouse_event, should_quit};
