//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules of the falling-block puzzle and the state
//! machine that applies them. It does no rendering, reads no clock, and owns
//! no timers, so a collaborator is free to drive it from a terminal, a browser
//! bridge, or a scripted replay.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision tests and row sweeps
//! - [`engine`]: Complete game state: session lifecycle, movement, locking
//! - [`error`]: Error type for mode and action names coming from outside
//! - [`events`]: Notifications the engine queues for its collaborator
//! - [`pieces`]: Shape matrices, clockwise rotation, horizontal wall kicks
//! - [`rng`]: Uniform random piece draws and a scripted source for replays
//! - [`scoring`]: Line-clear points and level progression
//! - [`snapshot`]: Plain-data copy of the state for rendering or serialization
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: every piece is an independent draw over the seven kinds
//! - **Rotation**: clockwise only, with kicks of +1, -1, +2, -2 columns
//! - **No lock delay**: a blocked fall step locks immediately
//! - **Invert mode**: pieces spawn on the bottom row and rise
//! - **Scoring**: 40 / 100 / 300 / 1200 times (level + 1); a level per 10 lines
//!
//! # Example
//!
//! ```
//! use flip_tetris_core::Engine;
//! use flip_tetris_core::types::{GameAction, GameMode};
//!
//! let mut engine = Engine::new(12345);
//! engine.start_session(GameMode::Classic);
//!
//! engine.apply_action(GameAction::MoveRight);
//! engine.apply_action(GameAction::Rotate);
//! engine.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(engine.pieces_locked(), 1);
//! assert!(!engine.game_over());
//! ```
//!
//! # Timing
//!
//! The engine only reacts to commands. The collaborator calls
//! [`Engine::soft_drop`] on its gravity timer and uses the constants in
//! [`types`] for shake, dissolve, and blind-mode reveal animations.

pub mod board;
pub mod engine;
pub mod error;
pub mod events;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use flip_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows};
pub use engine::{spawn_origin, Engine, Phase};
pub use error::{parse_action, parse_mode, EngineError};
pub use events::{EngineEvent, GameOverCause};
pub use pieces::{get_shape, try_rotate, ActivePiece, PieceShape};
pub use rng::{FixedPieces, PieceSource, SimpleRng, UniformPieces};
pub use scoring::{calculate_level, calculate_line_score};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
