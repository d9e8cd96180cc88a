//! Mahjong Solitaire (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `mahjong_solitaire::{core,input,store,term,types}` and
//! adds the [`session`] glue used by the terminal binary.

pub mod session;

pub use mahjong_core as core;
pub use mahjong_input as input;
pub use mahjong_store as store;
pub use mahjong_term as term;
pub use mahjong_types as types;

pub use session::{Session, SessionConfig};
