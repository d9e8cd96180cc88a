//! Flat-file persistence for the game
//!
//! Two small text formats, both best-effort from the game's point of view:
//!
//! - [`layout`]: a raw board layout, one `kind,x,y,z` record per line, read
//!   and written by the level editor.
//! - [`best_time`]: the best clearing time, a single float in seconds.
//!
//! Errors are typed so callers can tell "nothing there yet" apart from "there
//! is something, but it is broken". Neither store logs on the happy path.

pub mod best_time;
pub mod layout;

pub use mahjong_types as types;

pub use best_time::{BestTimeRecord, RecordError, DEFAULT_BEST_TIME_FILE};
pub use layout::{load_layout, parse_layout, save_layout, write_layout, LayoutError};
