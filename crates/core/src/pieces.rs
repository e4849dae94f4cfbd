//! Pieces module - Tetromino shape matrices and wall-kick rotation
//!
//! Every piece kind owns a square matrix (2x2, 3x3 or 4x4) whose occupied
//! cells are tagged with the kind. Rotation is a clockwise matrix rotation
//! (transpose, then reverse each row) inside the same square, so the matrix
//! size never changes.
//!
//! Rotation never edits a piece in place: a rotated candidate is built as a new
//! value, validated, and only then returned to the caller.

use crate::types::{Cell, PieceKind};

/// Largest shape matrix side (the I piece).
pub const MAX_SHAPE_SIZE: usize = 4;

/// Horizontal offsets tried, in order, when an in-place rotation is blocked.
pub const WALL_KICKS: [i8; 4] = [1, -1, 2, -2];

/// Offset of a single mino, relative to the shape origin or absolute on the board.
pub type MinoOffset = (i8, i8);

/// The four minos of a tetromino.
pub type MinoCells = [MinoOffset; 4];

fn layout(kind: PieceKind) -> &'static [&'static str] {
    match kind {
        PieceKind::I => &[".#..", ".#..", ".#..", ".#.."],
        PieceKind::J => &[".#.", ".#.", "##."],
        PieceKind::L => &[".#.", ".#.", ".##"],
        PieceKind::O => &["##", "##"],
        PieceKind::S => &[".##", "##.", "..."],
        PieceKind::T => &["###", ".#.", "..."],
        PieceKind::Z => &["##.", ".##", "..."],
    }
}

/// Square shape matrix of a piece in one rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceShape {
    size: u8,
    cells: [[Cell; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl PieceShape {
    /// Side length of the matrix.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Cell at matrix coordinates; `None` outside the matrix.
    pub fn get(&self, x: usize, y: usize) -> Cell {
        let n = self.size as usize;
        if x >= n || y >= n {
            return None;
        }
        self.cells[y][x]
    }

    /// Occupied cells in row-major order.
    pub fn minos(&self) -> MinoCells {
        let mut out = [(0, 0); 4];
        let mut i = 0usize;
        let n = self.size as usize;
        for y in 0..n {
            for x in 0..n {
                if self.cells[y][x].is_some() && i < out.len() {
                    out[i] = (x as i8, y as i8);
                    i += 1;
                }
            }
        }
        out
    }

    /// Clockwise rotation: transpose, then reverse each row.
    pub fn rotated_cw(&self) -> Self {
        let n = self.size as usize;
        let mut cells = [[None; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in cells.iter_mut().enumerate().take(n) {
            for (x, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.cells[n - 1 - x][y];
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }

    /// Index of the lowest occupied row, plus one.
    ///
    /// This is the height invert mode uses to seat a new piece on the bottom edge.
    pub fn occupied_height(&self) -> u8 {
        let n = self.size as usize;
        (0..n)
            .rev()
            .find(|&y| self.cells[y][..n].iter().any(|c| c.is_some()))
            .map(|y| y as u8 + 1)
            .unwrap_or(0)
    }

    /// Render as a u8 matrix (0 = empty, otherwise the kind code).
    pub fn to_codes(&self) -> [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE] {
        let mut out = [[0u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in self.cells.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                out[y][x] = cell.map(|k| k.code()).unwrap_or(0);
            }
        }
        out
    }
}

/// Get the canonical (spawn) shape for a piece kind
pub fn get_shape(kind: PieceKind) -> PieceShape {
    let rows = layout(kind);
    let mut cells = [[None; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
    for (y, row) in rows.iter().enumerate() {
        for (x, b) in row.bytes().enumerate() {
            if b == b'#' {
                cells[y][x] = Some(kind);
            }
        }
    }
    PieceShape {
        size: rows.len() as u8,
        cells,
    }
}

/// Active piece: current shape of its kind plus grid origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: PieceShape,
    pub x: i8,
    pub y: i8,
    /// Set on the value handed to the lock once a fall step was obstructed.
    pub collided: bool,
}

impl ActivePiece {
    /// New piece in its canonical rotation at the given origin.
    pub fn new(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            shape: get_shape(kind),
            x,
            y,
            collided: false,
        }
    }

    /// Absolute board coordinates of every mino.
    pub fn cells(&self) -> MinoCells {
        self.shape.minos().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn with_shape(&self, shape: PieceShape) -> Self {
        Self { shape, ..*self }
    }
}

/// Try to rotate a piece clockwise with horizontal wall kicks
///
/// The rotated shape is tested in place first, then at each offset of
/// [`WALL_KICKS`] from the original column. Returns the first candidate that
/// `fits` accepts, or `None` if every placement is blocked.
pub fn try_rotate(piece: &ActivePiece, fits: impl Fn(&ActivePiece) -> bool) -> Option<ActivePiece> {
    let rotated = piece.with_shape(piece.shape.rotated_cw());
    if fits(&rotated) {
        return Some(rotated);
    }

    WALL_KICKS
        .iter()
        .map(|&dx| rotated.shifted(dx, 0))
        .find(|candidate| fits(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_sizes() {
        assert_eq!(get_shape(PieceKind::I).size(), 4);
        assert_eq!(get_shape(PieceKind::O).size(), 2);
        for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::T, PieceKind::Z] {
            assert_eq!(get_shape(kind).size(), 3, "{:?}", kind);
        }
    }

    #[test]
    fn test_every_shape_has_four_minos_tagged_with_kind() {
        for kind in PieceKind::ALL {
            let shape = get_shape(kind);
            let n = shape.size() as usize;
            let mut count = 0;
            for y in 0..n {
                for x in 0..n {
                    if let Some(tag) = shape.get(x, y) {
                        assert_eq!(tag, kind);
                        count += 1;
                    }
                }
            }
            assert_eq!(count, 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_i_piece_canonical_is_vertical() {
        let shape = get_shape(PieceKind::I);
        assert_eq!(shape.minos(), [(1, 0), (1, 1), (1, 2), (1, 3)]);
    }

    #[test]
    fn test_rotate_i_piece_becomes_horizontal() {
        let rotated = get_shape(PieceKind::I).rotated_cw();
        assert_eq!(rotated.size(), 4);
        assert_eq!(rotated.minos(), [(0, 1), (1, 1), (2, 1), (3, 1)]);
    }

    #[test]
    fn test_rotate_t_piece_clockwise() {
        // ###      ..#
        // .#.  ->  .##
        // ...      ..#
        let rotated = get_shape(PieceKind::T).rotated_cw();
        assert_eq!(rotated.minos(), [(2, 0), (1, 1), (2, 1), (2, 2)]);
    }

    #[test]
    fn test_four_rotations_return_to_start() {
        for kind in PieceKind::ALL {
            let shape = get_shape(kind);
            let back = shape.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(back, shape, "{:?}", kind);
        }
    }

    #[test]
    fn test_o_piece_rotation_is_identity() {
        let shape = get_shape(PieceKind::O);
        assert_eq!(shape.rotated_cw(), shape);
    }

    #[test]
    fn test_occupied_height() {
        assert_eq!(get_shape(PieceKind::I).occupied_height(), 4);
        assert_eq!(get_shape(PieceKind::J).occupied_height(), 3);
        assert_eq!(get_shape(PieceKind::L).occupied_height(), 3);
        assert_eq!(get_shape(PieceKind::O).occupied_height(), 2);
        assert_eq!(get_shape(PieceKind::S).occupied_height(), 2);
        assert_eq!(get_shape(PieceKind::T).occupied_height(), 2);
        assert_eq!(get_shape(PieceKind::Z).occupied_height(), 2);
    }

    #[test]
    fn test_active_piece_cells_are_offset_by_origin() {
        let piece = ActivePiece::new(PieceKind::O, 4, 7);
        assert_eq!(piece.cells(), [(4, 7), (5, 7), (4, 8), (5, 8)]);
    }

    #[test]
    fn test_try_rotate_in_place() {
        let piece = ActivePiece::new(PieceKind::T, 3, 3);
        let rotated = try_rotate(&piece, |_| true).unwrap();
        assert_eq!(rotated.x, 3);
        assert_eq!(rotated.shape, piece.shape.rotated_cw());
    }

    #[test]
    fn test_try_rotate_kick_order() {
        let piece = ActivePiece::new(PieceKind::T, 3, 3);

        // Only the -1 kick fits; +1 is tried first and must be skipped.
        let rotated = try_rotate(&piece, |p| p.x == 2).unwrap();
        assert_eq!(rotated.x, 2);

        // Both +2 and -2 fit; +2 comes first.
        let rotated = try_rotate(&piece, |p| p.x == 5 || p.x == 1).unwrap();
        assert_eq!(rotated.x, 5);
    }

    #[test]
    fn test_try_rotate_rejected() {
        let piece = ActivePiece::new(PieceKind::T, 3, 3);
        assert!(try_rotate(&piece, |_| false).is_none());
    }
}
