//! Engine events
//!
//! Commands queue events as they mutate state. Visual effects (lock shake, row
//! dissolve, game-over screen) are driven from these by the collaborator; the
//! engine itself keeps no transient visual state and schedules no timers.

use crate::board::ClearedRows;
use crate::pieces::MinoCells;
use crate::types::PieceKind;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GameOverCause {
    /// A freshly spawned piece overlapped locked cells.
    SpawnOverlap,
    /// A blocked fall step left part of the piece beyond the entry edge.
    ExitedBoard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
pub enum EngineEvent {
    /// A piece was written into the grid at `cells`.
    Locked { kind: PieceKind, cells: MinoCells },
    /// Rows were removed (pre-sweep indices, bottom first) and `points` awarded.
    RowsCleared { rows: ClearedRows, points: u32 },
    /// The session ended; the grid has already been reset.
    GameOver { cause: GameOverCause },
}

impl EngineEvent {
    pub fn name(&self) -> &'static str {
        match self {
            EngineEvent::Locked { .. } => "locked",
            EngineEvent::RowsCleared { .. } => "rows_cleared",
            EngineEvent::GameOver { .. } => "game_over",
        }
    }
}
