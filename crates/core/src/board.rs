//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//!
//! The tag stored in a cell is only used for color lookup; for collision and
//! clearing a cell is simply occupied or empty.

use arrayvec::ArrayVec;

use crate::pieces::ActivePiece;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Number of rows, as an index bound.
pub const BOARD_ROWS: usize = BOARD_HEIGHT as usize;

/// Row indices removed by one sweep, reported by their pre-sweep position.
pub type ClearedRows = ArrayVec<usize, BOARD_ROWS>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_none()
    }

    /// Would `piece`, offset by (dx, dy), hit a wall, leave the board, or overlap a block?
    ///
    /// A target with no such row and a target row whose cell is occupied both
    /// count as a collision. This is the only placement check the engine uses.
    pub fn collides(&self, piece: &ActivePiece, dx: i8, dy: i8) -> bool {
        piece.cells().iter().any(|&(x, y)| match self.get(x + dx, y + dy) {
            None => true,
            Some(Some(_)) => true,
            Some(None) => false,
        })
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_ROWS {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Check if a row has no filled cell
    pub fn is_row_empty(&self, y: usize) -> bool {
        if y >= BOARD_ROWS {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_none())
    }

    /// Remove a row, shift all rows above down and insert an empty row at the top
    /// Returns the number of rows removed (1 or 0)
    pub fn clear_row(&mut self, y: usize) -> usize {
        if y >= BOARD_ROWS {
            return 0;
        }

        let width = BOARD_WIDTH as usize;

        // copy_within handles overlapping ranges safely
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells
                .copy_within(src_start..src_start + width, dst_start);
        }

        for cell in &mut self.cells[0..width] {
            *cell = None;
        }

        1
    }

    /// Remove every full row at index 1 or below, compacting the board
    ///
    /// Scans from the bottom up and re-checks the same index after each removal,
    /// since the row above has just shifted into it. Index 0 itself is never
    /// cleared, but a full row that shifts down out of it is.
    /// Returned indices refer to row positions before the sweep, bottom first.
    pub fn sweep_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut y = BOARD_ROWS - 1;

        while y > 0 {
            if self.is_row_full(y) {
                // Every removal so far was at or below y, so the row now at y
                // started `cleared.len()` rows higher.
                cleared.push(y - cleared.len());
                self.clear_row(y);
            } else {
                y -= 1;
            }
        }

        cleared
    }

    /// Write a piece's cells into the board
    ///
    /// Only empty in-bounds cells are written; occupied or off-board cells are
    /// skipped. Returns the number of cells written.
    pub fn lock_piece(&mut self, piece: &ActivePiece) -> usize {
        let mut written = 0;
        for (x, y) in piece.cells() {
            if let Some(idx) = Self::index(x, y) {
                if self.cells[idx].is_none() {
                    self.cells[idx] = Some(piece.kind);
                    written += 1;
                }
            }
        }
        written
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(BOARD_WIDTH as usize)
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Check if no cell is filled
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_none())
    }

    /// Export as a u8 grid (0 = empty, otherwise the piece kind code)
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_ROWS]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            for (d, s) in dst.iter_mut().zip(src.iter()) {
                *d = s.map(|k| k.code()).unwrap_or(0);
            }
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Build a board from text rows (`.` empty, piece letter filled), top to bottom
    ///
    /// Missing rows at the top are left empty, which makes small fixtures short.
    /// Characters that are not piece letters are treated as empty.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let offset = BOARD_ROWS.saturating_sub(rows.len());
        for (i, row) in rows.iter().take(BOARD_ROWS).enumerate() {
            let y = (offset + i) as i8;
            for (x, ch) in row.chars().take(BOARD_WIDTH as usize).enumerate() {
                let cell = PieceKind::from_str(&ch.to_string());
                board.set(x as i8, y, cell);
            }
        }
        board
    }

    /// Render as text rows (`.` empty, uppercase piece letter filled), top to bottom
    pub fn to_ascii(&self) -> Vec<String> {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|c| c.map(|k| k.tag()).unwrap_or('.'))
                    .collect()
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, y: i8) {
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, y, Some(PieceKind::I));
        }
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_board_flat_array() {
        let mut board = Board::new();

        board.set(0, 0, Some(PieceKind::I));
        board.set(5, 10, Some(PieceKind::T));

        assert_eq!(board.get(0, 0), Some(Some(PieceKind::I)));
        assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));

        assert_eq!(board.cells[0], Some(PieceKind::I));
        assert_eq!(board.cells[10 * 10 + 5], Some(PieceKind::T));
    }

    #[test]
    fn test_collides_distinguishes_missing_row_from_occupied_cell() {
        let mut board = Board::new();
        let piece = ActivePiece::new(PieceKind::O, 4, 0);

        assert!(!board.collides(&piece, 0, 0));
        // No row -1
        assert!(board.collides(&piece, 0, -1));
        // No row 20
        assert!(board.collides(&piece, 0, 19));

        board.set(5, 2, Some(PieceKind::T));
        assert!(board.collides(&piece, 0, 1));
    }

    #[test]
    fn test_collides_horizontal_bounds() {
        let board = Board::new();
        let piece = ActivePiece::new(PieceKind::O, 0, 5);
        assert!(board.collides(&piece, -1, 0));
        assert!(!board.collides(&piece, 8, 0));
        assert!(board.collides(&piece, 9, 0));
    }

    #[test]
    fn test_lock_piece_does_not_overwrite() {
        let mut board = Board::new();
        board.set(4, 10, Some(PieceKind::Z));
        let piece = ActivePiece::new(PieceKind::O, 4, 10);

        assert_eq!(board.lock_piece(&piece), 3);
        assert_eq!(board.get(4, 10), Some(Some(PieceKind::Z)));
        assert_eq!(board.get(5, 10), Some(Some(PieceKind::O)));
        assert_eq!(board.get(4, 11), Some(Some(PieceKind::O)));
        assert_eq!(board.get(5, 11), Some(Some(PieceKind::O)));
    }

    #[test]
    fn test_lock_piece_skips_off_board_cells() {
        let mut board = Board::new();
        let piece = ActivePiece::new(PieceKind::O, 4, -1);
        assert_eq!(board.lock_piece(&piece), 2);
        assert_eq!(board.filled_count(), 2);
    }

    #[test]
    fn test_sweep_single_bottom_row() {
        let mut board = Board::new();
        fill_row(&mut board, 19);
        board.set(3, 18, Some(PieceKind::T));

        let cleared = board.sweep_rows();
        assert_eq!(cleared.as_slice(), &[19]);
        assert_eq!(board.get(3, 19), Some(Some(PieceKind::T)));
        assert!(board.is_row_empty(0));
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn test_sweep_reports_pre_sweep_indices() {
        let mut board = Board::new();
        fill_row(&mut board, 19);
        fill_row(&mut board, 18);
        fill_row(&mut board, 16);
        board.set(0, 17, Some(PieceKind::L));

        let cleared = board.sweep_rows();
        assert_eq!(cleared.as_slice(), &[19, 18, 16]);
        assert_eq!(board.get(0, 19), Some(Some(PieceKind::L)));
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn test_sweep_never_clears_top_row() {
        let mut board = Board::new();
        fill_row(&mut board, 0);

        let cleared = board.sweep_rows();
        assert!(cleared.is_empty());
        assert!(board.is_row_full(0));
    }

    #[test]
    fn test_sweep_full_board_clears_every_row() {
        let mut board = Board::new();
        for y in 0..BOARD_HEIGHT as i8 {
            fill_row(&mut board, y);
        }

        let cleared = board.sweep_rows();
        assert_eq!(cleared.len(), BOARD_ROWS);
        assert_eq!(cleared[0], 19);
        assert_eq!(cleared[cleared.len() - 1], 0);
        assert!(board.is_empty());
    }

    #[test]
    fn test_sweep_clears_top_row_once_it_shifts_down() {
        let mut board = Board::new();
        fill_row(&mut board, 0);
        fill_row(&mut board, 19);

        let cleared = board.sweep_rows();
        assert_eq!(cleared.as_slice(), &[19, 0]);
        assert!(board.is_empty());
        assert!(board.sweep_rows().is_empty());
    }

    #[test]
    fn test_ascii_roundtrip() {
        let board = Board::from_ascii(&["..T.......", "IIII.OO..."]);
        assert_eq!(board.get(2, 18), Some(Some(PieceKind::T)));
        assert_eq!(board.get(5, 19), Some(Some(PieceKind::O)));
        let rows = board.to_ascii();
        assert_eq!(rows[18], "..T.......");
        assert_eq!(rows[19], "IIII.OO...");
    }
}
