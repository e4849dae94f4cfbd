//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine and its
//! collaborators. All types are plain data with no runtime dependencies, making
//! them usable from the core logic, a renderer, or a scripted driver alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Game Modes
//!
//! | Mode | Gravity | Spawn edge |
//! |------|---------|------------|
//! | `classic` | down (+y) | top, centered |
//! | `invert` | up (-y) | bottom, column 3 |
//! | `blind` | down (+y) | top, centered |
//! | `superblind` | down (+y) | top, centered |
//!
//! Blind and super-blind only differ from classic in how long the collaborator
//! keeps pieces visible; the engine treats them as classic.
//!
//! # Collaborator Timing Constants
//!
//! Timing values are in milliseconds and are never read by the engine itself:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `LOCK_SHAKE_MS` | 200 | Soft shake after a piece locks |
//! | `CLEAR_DISSOLVE_MS` | 500 | Hard shake + row dissolve after a clear |
//! | `SUPERBLIND_SHOW_PIECE_MS` | 500 | Active piece visibility in super-blind |
//! | `SUPERBLIND_SHOW_LOCK_MS` | 500 | Locked piece visibility in super-blind |
//!
//! # Examples
//!
//! ```
//! use flip_tetris_types::{GameAction, GameMode, Gravity, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! // Parse from string (case-insensitive)
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(GameMode::from_str("Invert"), Some(GameMode::Invert));
//! assert_eq!(GameMode::Invert.gravity(), Gravity::Up);
//!
//! // Parse game action
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

#[cfg(feature = "serde")]
use serde::Serialize;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Fixed spawn column for invert mode.
pub const INVERT_SPAWN_X: i8 = 3;

/// Lines required per level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Soft shake duration after a lock (collaborator-side).
pub const LOCK_SHAKE_MS: u32 = 200;

/// Hard shake and row dissolve duration after a clear (collaborator-side).
pub const CLEAR_DISSOLVE_MS: u32 = 500;

/// How long the active piece stays visible in super-blind mode.
pub const SUPERBLIND_SHOW_PIECE_MS: u32 = 500;

/// How long a locked piece stays visible in super-blind mode.
pub const SUPERBLIND_SHOW_LOCK_MS: u32 = 500;

/// Display color of an empty cell.
pub const EMPTY_COLOR: &str = "#f0f0f0";

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N lines at level 0, indexed by `N - 1`:
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 4] = [40, 100, 300, 1200];

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, straight bar (4x4 matrix)
/// - **J**: Blue (3x3)
/// - **L**: Orange (3x3)
/// - **O**: Yellow, square (2x2)
/// - **S**: Green (3x3)
/// - **T**: Purple (3x3)
/// - **Z**: Red (3x3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in draw order (`IJLOSTZ`).
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use flip_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Uppercase tag letter, as stored in locked cells.
    pub fn tag(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }

    /// Display color as a hex string.
    ///
    /// ```
    /// use flip_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.color(), "#00ffff");
    /// assert_eq!(PieceKind::T.color(), "#800080");
    /// ```
    pub fn color(&self) -> &'static str {
        match self {
            PieceKind::I => "#00ffff",
            PieceKind::J => "#0000ff",
            PieceKind::L => "#ff7f00",
            PieceKind::O => "#ffff00",
            PieceKind::S => "#00ff00",
            PieceKind::T => "#800080",
            PieceKind::Z => "#ff0000",
        }
    }

    /// Stable 1-based code used by the u8 board grid (0 = empty).
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }
}

/// Direction in which the active piece falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Gravity {
    /// Towards higher row indices; pieces enter at the top.
    Down,
    /// Towards lower row indices; pieces enter at the bottom.
    Up,
}

impl Gravity {
    /// Row delta of a single fall step.
    pub fn dy(&self) -> i8 {
        match self {
            Gravity::Down => 1,
            Gravity::Up => -1,
        }
    }
}

/// Gameplay variants selectable at session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GameMode {
    #[default]
    Classic,
    Invert,
    Blind,
    SuperBlind,
}

/// Visibility windows the collaborator applies in hidden-piece modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealTiming {
    pub show_piece_ms: u32,
    pub show_lock_ms: u32,
}

impl GameMode {
    /// Parse mode from string (case-insensitive)
    ///
    /// ```
    /// use flip_tetris_types::GameMode;
    ///
    /// assert_eq!(GameMode::from_str("classic"), Some(GameMode::Classic));
    /// assert_eq!(GameMode::from_str("SuperBlind"), Some(GameMode::SuperBlind));
    /// assert_eq!(GameMode::from_str("zen"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(GameMode::Classic),
            "invert" => Some(GameMode::Invert),
            "blind" => Some(GameMode::Blind),
            "superblind" => Some(GameMode::SuperBlind),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Invert => "invert",
            GameMode::Blind => "blind",
            GameMode::SuperBlind => "superblind",
        }
    }

    pub fn gravity(&self) -> Gravity {
        match self {
            GameMode::Invert => Gravity::Up,
            GameMode::Classic | GameMode::Blind | GameMode::SuperBlind => Gravity::Down,
        }
    }

    /// Visibility windows for super-blind; `None` for every other mode.
    pub fn reveal_timing(&self) -> Option<RevealTiming> {
        match self {
            GameMode::SuperBlind => Some(RevealTiming {
                show_piece_ms: SUPERBLIND_SHOW_PIECE_MS,
                show_lock_ms: SUPERBLIND_SHOW_LOCK_MS,
            }),
            _ => None,
        }
    }
}

/// Game actions that can be applied to modify game state
///
/// Drop actions follow the session's gravity: in invert mode `SoftDrop` moves
/// the piece up one row and `HardDrop` sends it to the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise (with wall kicks)
    Rotate,
    /// Advance piece one cell in the gravity direction, locking if blocked
    SoftDrop,
    /// Advance piece as far as possible and lock
    HardDrop,
    /// Start a fresh session in the current mode
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use flip_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotate" => Some(GameAction::Rotate),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::Rotate => "rotate",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Restart => "restart",
        }
    }

    /// Parse a single-character script code.
    ///
    /// `l` left, `r` right, `u` rotate, `d` soft drop, `h` hard drop, `n` restart.
    pub fn from_code(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'l' => Some(GameAction::MoveLeft),
            'r' => Some(GameAction::MoveRight),
            'u' => Some(GameAction::Rotate),
            'd' => Some(GameAction::SoftDrop),
            'h' => Some(GameAction::HardDrop),
            'n' => Some(GameAction::Restart),
            _ => None,
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the specified piece kind
pub type Cell = Option<PieceKind>;
