//! Flip Tetris (workspace facade crate).
//!
//! The rules live in `crates/core` and the shared data types in `crates/types`;
//! this package re-exports them as `flip_tetris::{core, types}` and adds the
//! scripted replay driver used by the `flip-tetris` binary.

pub use flip_tetris_core as core;
pub use flip_tetris_types as types;

pub mod replay;
