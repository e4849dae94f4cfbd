use crate::pieces::{ActivePiece, MinoCells, MAX_SHAPE_SIZE};
use crate::types::{GameMode, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub x: i8,
    pub y: i8,
    /// Current rotation as a u8 matrix; only the top-left `size` square is used.
    pub shape: [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
    pub size: u8,
    /// Absolute board cells.
    pub cells: MinoCells,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            x: value.x,
            y: value.y,
            shape: value.shape.to_codes(),
            size: value.shape.size(),
            cells: value.cells(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub next: Option<PieceKind>,
    pub mode: GameMode,
    pub game_over: bool,
    pub pieces_locked: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.next = None;
        self.mode = GameMode::Classic;
        self.game_over = false;
        self.pieces_locked = 0;
        self.score = 0;
        self.level = 0;
        self.lines = 0;
    }

    pub fn playable(&self) -> bool {
        !self.game_over && self.active.is_some()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: None,
            mode: GameMode::Classic,
            game_over: false,
            pieces_locked: 0,
            score: 0,
            level: 0,
            lines: 0,
        }
    }
}
