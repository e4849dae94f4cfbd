//! Configuration errors
//!
//! Gameplay never fails: blocked moves and rotations are reported as `false`.
//! Only malformed configuration (an unknown mode or action name) is an error.

use thiserror::Error;

use crate::types::{GameAction, GameMode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("unknown game mode: {0:?} (expected classic, invert, blind or superblind)")]
    UnknownMode(String),
    #[error("unknown action: {0:?}")]
    UnknownAction(String),
}

/// Parse a mode name, failing fast on anything unrecognised
pub fn parse_mode(name: &str) -> Result<GameMode, EngineError> {
    GameMode::from_str(name.trim()).ok_or_else(|| EngineError::UnknownMode(name.to_string()))
}

/// Parse an action name (`moveLeft`, `hardDrop`, ...)
pub fn parse_action(name: &str) -> Result<GameAction, EngineError> {
    GameAction::from_str(name.trim()).ok_or_else(|| EngineError::UnknownAction(name.to_string()))
}
