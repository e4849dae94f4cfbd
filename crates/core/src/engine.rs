//! Engine module - the complete game state and its transitions
//!
//! This module ties together the board, pieces, piece source, and scoring. It
//! owns the single active piece and performs every state transition: spawn,
//! horizontal move, rotation, fall steps, locking, and row sweeps.
//!
//! The engine never schedules anything. A collaborator calls [`Engine::soft_drop`]
//! on its own gravity timer, forwards input as commands, then reads the public
//! state (or a [`GameSnapshot`]) and drains [`EngineEvent`]s after each call.
//!
//! Gravity is mode-dependent: classic-like modes spawn at the top and fall down
//! (+y), invert mode spawns on the bottom edge and rises (-y).

use log::{debug, info, trace};

use crate::board::Board;
use crate::error::{parse_mode, EngineError};
use crate::events::{EngineEvent, GameOverCause};
use crate::pieces::{get_shape, try_rotate, ActivePiece};
use crate::rng::{PieceSource, UniformPieces};
use crate::scoring::{calculate_level, calculate_line_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Coarse lifecycle state visible between commands
///
/// The drop commands lock, sweep and spawn inside a single call, so between
/// them the engine is `Falling` or `GameOver`. `Spawning` is only seen after a
/// caller runs [`Engine::lock`] on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No session has been started yet.
    Idle,
    /// An active piece is in play.
    Falling,
    /// The session is running but the next piece has not been spawned.
    Spawning,
    /// Terminal until the next `start_session`.
    GameOver,
}

/// Spawn origin of a piece kind for a gravity direction
///
/// Falling pieces are centered on the top row; rising pieces sit at column 3
/// with their lowest occupied row on the bottom row.
pub fn spawn_origin(kind: PieceKind, gravity: Gravity) -> (i8, i8) {
    let shape = get_shape(kind);
    match gravity {
        Gravity::Down => (
            (BOARD_WIDTH / 2) as i8 - (shape.size() / 2) as i8,
            0,
        ),
        Gravity::Up => (
            INVERT_SPAWN_X,
            BOARD_HEIGHT as i8 - shape.occupied_height() as i8,
        ),
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Engine<S: PieceSource = UniformPieces> {
    board: Board,
    active: Option<ActivePiece>,
    next: Option<PieceKind>,
    pieces: S,
    mode: GameMode,
    score: u32,
    lines: u32,
    level: u32,
    /// Monotonic count of pieces written into the grid this session.
    pieces_locked: u32,
    game_over: bool,
    started: bool,
    /// Events produced since the last `take_events`.
    events: Vec<EngineEvent>,
}

impl Engine<UniformPieces> {
    /// Create an engine drawing uniformly random pieces from the given seed
    pub fn new(seed: u32) -> Self {
        Self::with_source(UniformPieces::new(seed))
    }
}

impl Default for Engine<UniformPieces> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<S: PieceSource> Engine<S> {
    /// Create an engine drawing from any piece source
    pub fn with_source(pieces: S) -> Self {
        Self {
            board: Board::new(),
            active: None,
            next: None,
            pieces,
            mode: GameMode::Classic,
            score: 0,
            lines: 0,
            level: 0,
            pieces_locked: 0,
            game_over: false,
            started: false,
            events: Vec::new(),
        }
    }

    /// Reset everything and spawn the first piece in `mode`
    pub fn start_session(&mut self, mode: GameMode) {
        self.board.clear();
        self.active = None;
        self.score = 0;
        self.lines = 0;
        self.level = 0;
        self.pieces_locked = 0;
        self.game_over = false;
        self.started = true;
        self.mode = mode;
        self.events.clear();

        info!("session started: mode={}", mode.as_str());

        self.next = Some(self.pieces.next_kind());
        self.spawn();
    }

    /// Start a session from a mode name; unknown names leave the engine untouched
    pub fn start_session_named(&mut self, mode: &str) -> Result<(), EngineError> {
        let mode = parse_mode(mode)?;
        self.start_session(mode);
        Ok(())
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next_piece(&self) -> Option<PieceKind> {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if !self.started {
            Phase::Idle
        } else if self.active.is_some() {
            Phase::Falling
        } else {
            Phase::Spawning
        }
    }

    /// Replace the grid, e.g. to set up a puzzle or a test position
    ///
    /// The active piece is left where it is, even if it now overlaps.
    pub fn set_board(&mut self, board: Board) {
        self.board = board;
    }

    /// Events queued since the last call, oldest first
    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    /// Take and clear the queued events
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.next;
        out.mode = self.mode;
        out.game_over = self.game_over;
        out.pieces_locked = self.pieces_locked;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Promote the pending piece to active and draw a new pending piece
    ///
    /// If the new piece overlaps locked cells where it appears, the grid is
    /// cleared and the game ends. Returns true if a piece is now in play.
    pub fn spawn(&mut self) -> bool {
        if self.game_over {
            return false;
        }

        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.pieces.next_kind(),
        };
        self.next = Some(self.pieces.next_kind());

        let (x, y) = spawn_origin(kind, self.mode.gravity());
        let piece = ActivePiece::new(kind, x, y);

        if self.board.collides(&piece, 0, 0) {
            self.end_game(GameOverCause::SpawnOverlap);
            return false;
        }

        trace!("spawned {:?} at ({}, {}), next {:?}", kind, x, y, self.next);
        self.active = Some(piece);
        true
    }

    /// Move the active piece one column (`dx` is reduced to its sign)
    ///
    /// Returns false if the move is blocked or there is nothing to move.
    pub fn move_piece(&mut self, dx: i8) -> bool {
        if self.game_over {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let dx = dx.signum();
        if dx == 0 || self.board.collides(&active, dx, 0) {
            return false;
        }

        self.active = Some(active.shifted(dx, 0));
        true
    }

    /// Rotate the active piece clockwise, kicking up to two columns either way
    pub fn rotate(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        match try_rotate(&active, |candidate| !self.board.collides(candidate, 0, 0)) {
            Some(rotated) => {
                self.active = Some(rotated);
                true
            }
            None => false,
        }
    }

    /// Advance the active piece one row in the gravity direction
    ///
    /// When the step is blocked the piece either ends the game (if any of its
    /// cells is still beyond the entry edge at its current position) or locks,
    /// after which rows are swept and the next piece spawns. Returns true only
    /// if the piece moved.
    pub fn soft_drop(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let dy = self.mode.gravity().dy();
        if !self.board.collides(&active, 0, dy) {
            self.active = Some(active.shifted(0, dy));
            return true;
        }

        if self.beyond_entry_edge(&active) {
            self.end_game(GameOverCause::ExitedBoard);
            return false;
        }

        self.settle(active);
        false
    }

    /// Advance the active piece as far as it goes, then lock it unconditionally
    ///
    /// Returns the number of rows travelled. The entry-edge check of
    /// [`Engine::soft_drop`] is not applied; only the next spawn can end the game.
    pub fn hard_drop(&mut self) -> u32 {
        if self.game_over {
            return 0;
        }
        let Some(mut piece) = self.active else {
            return 0;
        };

        let dy = self.mode.gravity().dy();
        let mut distance: u32 = 0;
        while !self.board.collides(&piece, 0, dy) {
            piece = piece.shifted(0, dy);
            distance += 1;
        }

        self.settle(piece);
        distance
    }

    /// Write the active piece into the grid
    ///
    /// Cells that are already occupied are left as they are. Returns false if
    /// there is no active piece. This is one step of a drop: rows are not swept
    /// and no piece is spawned, so a caller using it directly follows up with
    /// [`Engine::sweep_rows`] and [`Engine::spawn`].
    pub fn lock(&mut self) -> bool {
        let Some(piece) = self.active.take() else {
            return false;
        };

        let written = self.board.lock_piece(&piece);
        self.pieces_locked = self.pieces_locked.wrapping_add(1);
        debug!(
            "locked {:?} at ({}, {}), {} cells written",
            piece.kind, piece.x, piece.y, written
        );
        self.events.push(EngineEvent::Locked {
            kind: piece.kind,
            cells: piece.cells(),
        });
        true
    }

    /// Remove full rows (index 0 itself is exempt) and award points
    ///
    /// Returns the number of rows removed.
    pub fn sweep_rows(&mut self) -> usize {
        let rows = self.board.sweep_rows();
        let n = rows.len();
        if n == 0 {
            return 0;
        }

        let points = calculate_line_score(n, self.level);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(n as u32);
        self.level = calculate_level(self.lines);

        debug!(
            "cleared rows {:?}: +{} (score {}, lines {}, level {})",
            rows.as_slice(),
            points,
            self.score,
            self.lines,
            self.level
        );
        self.events.push(EngineEvent::RowsCleared { rows, points });
        n
    }

    /// Row the active piece would settle at on a hard drop
    pub fn ghost_y(&self) -> Option<i8> {
        let mut piece = self.active?;
        let dy = self.mode.gravity().dy();
        while !self.board.collides(&piece, 0, dy) {
            piece = piece.shifted(0, dy);
        }
        Some(piece.y)
    }

    /// Apply a game action
    ///
    /// Returns true if the action changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_piece(-1),
            GameAction::MoveRight => self.move_piece(1),
            GameAction::Rotate => self.rotate(),
            GameAction::SoftDrop => {
                let had_piece = !self.game_over && self.active.is_some();
                self.soft_drop();
                had_piece
            }
            GameAction::HardDrop => {
                let had_piece = !self.game_over && self.active.is_some();
                self.hard_drop();
                had_piece
            }
            GameAction::Restart => {
                self.start_session(self.mode);
                true
            }
        }
    }

    /// Lock a piece that can no longer fall, sweep, and bring in the next one
    fn settle(&mut self, piece: ActivePiece) {
        self.active = Some(ActivePiece {
            collided: true,
            ..piece
        });
        self.lock();
        self.sweep_rows();
        self.spawn();
    }

    /// Is any cell past the edge pieces enter from?
    fn beyond_entry_edge(&self, piece: &ActivePiece) -> bool {
        let cells = piece.cells();
        match self.mode.gravity() {
            Gravity::Down => cells.iter().any(|&(_, y)| y < 0),
            Gravity::Up => cells.iter().any(|&(_, y)| y >= BOARD_HEIGHT as i8),
        }
    }

    fn end_game(&mut self, cause: GameOverCause) {
        self.board.clear();
        self.active = None;
        self.game_over = true;
        info!(
            "game over ({:?}): score={}, lines={}, level={}",
            cause, self.score, self.lines, self.level
        );
        self.events.push(EngineEvent::GameOver { cause });
    }

    #[cfg(test)]
    fn set_active(&mut self, piece: ActivePiece) {
        self.active = Some(piece);
    }
}
