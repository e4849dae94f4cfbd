//! Property tests for row sweeps and collision

use proptest::prelude::*;

use flip_tetris::core::{ActivePiece, Board};
use flip_tetris::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const CELLS: usize = BOARD_WIDTH as usize * BOARD_HEIGHT as usize;

fn board_from_bits(bits: &[bool]) -> Board {
    let mut board = Board::new();
    for (i, &filled) in bits.iter().enumerate() {
        if filled {
            let x = (i % BOARD_WIDTH as usize) as i8;
            let y = (i / BOARD_WIDTH as usize) as i8;
            board.set(x, y, Some(PieceKind::T));
        }
    }
    board
}

/// Random cells with whole rows forced full, optionally including row 0
fn board_with_full_rows(bits: &[bool], full_rows: &[bool], top_full: bool) -> Board {
    let mut board = board_from_bits(bits);
    for (y, &full) in full_rows.iter().enumerate() {
        if full || (y == 0 && top_full) {
            for x in 0..BOARD_WIDTH as i8 {
                board.set(x, y as i8, Some(PieceKind::Z));
            }
        }
    }
    board
}

fn kind_strategy() -> impl Strategy<Value = PieceKind> {
    prop::sample::select(PieceKind::ALL.to_vec())
}

proptest! {
    #[test]
    fn sweep_is_idempotent(
        bits in prop::collection::vec(any::<bool>(), CELLS),
        full_rows in prop::collection::vec(prop::bool::weighted(0.3), BOARD_HEIGHT as usize),
        top_full in any::<bool>()
    ) {
        let mut once = board_with_full_rows(&bits, &full_rows, top_full);
        once.sweep_rows();

        // Nothing complete remains below index 0.
        for y in 1..BOARD_HEIGHT as usize {
            prop_assert!(!once.is_row_full(y), "row {} still full", y);
        }

        let mut twice = once.clone();
        let second = twice.sweep_rows();

        prop_assert!(second.is_empty());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn sweep_preserves_height_and_removes_whole_rows(
        bits in prop::collection::vec(prop::bool::weighted(0.85), CELLS),
        full_rows in prop::collection::vec(prop::bool::weighted(0.2), BOARD_HEIGHT as usize),
        top_full in any::<bool>()
    ) {
        let original = board_with_full_rows(&bits, &full_rows, top_full);
        let mut board = original.clone();
        let before = board.filled_count();

        let cleared = board.sweep_rows();

        prop_assert_eq!(board.rows().count(), BOARD_HEIGHT as usize);
        prop_assert!(cleared.len() <= BOARD_HEIGHT as usize);
        prop_assert_eq!(
            board.filled_count(),
            before - cleared.len() * BOARD_WIDTH as usize
        );
        prop_assert!(cleared.windows(2).all(|w| w[0] > w[1]));

        // Every full row below the top is reported by its original index.
        for y in 1..BOARD_HEIGHT as usize {
            prop_assert_eq!(original.is_row_full(y), cleared.contains(&y));
        }
        // A full top row only goes once something below it was removed.
        let top_cleared = cleared.contains(&0);
        prop_assert_eq!(
            top_cleared,
            original.is_row_full(0) && cleared.iter().any(|&y| y > 0)
        );
    }

    #[test]
    fn board_without_full_rows_is_unchanged(
        mut bits in prop::collection::vec(any::<bool>(), CELLS),
        gaps in prop::collection::vec(0..BOARD_WIDTH as usize, BOARD_HEIGHT as usize)
    ) {
        for (y, &gap) in gaps.iter().enumerate() {
            bits[y * BOARD_WIDTH as usize + gap] = false;
        }
        let original = board_from_bits(&bits);
        let mut board = original.clone();

        prop_assert!(board.sweep_rows().is_empty());
        prop_assert_eq!(board, original);
    }

    #[test]
    fn lock_only_fills_empty_in_bounds_cells(
        bits in prop::collection::vec(prop::bool::weighted(0.3), CELLS),
        kind in kind_strategy(),
        x in -3i8..12,
        y in -3i8..22
    ) {
        let mut board = board_from_bits(&bits);
        let before = board.filled_count();
        let piece = ActivePiece::new(kind, x, y);

        let written = board.lock_piece(&piece);

        prop_assert!(written <= 4);
        prop_assert_eq!(board.filled_count(), before + written);
        if !board_from_bits(&bits).collides(&piece, 0, 0) {
            prop_assert_eq!(written, 4);
        }
    }
}
