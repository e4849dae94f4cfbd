//! Scoring module - classic line-clear scoring and level progression
//!
//! Points for a clear are `LINE_SCORES[n - 1] * (level + 1)` where `level` is the
//! level before the clear is counted. Levels advance every ten lines.

use crate::types::{LINES_PER_LEVEL, LINE_SCORES};

/// Calculate line clear score
/// lines: number of rows removed by one sweep
/// level: current level (0-based)
///
/// Only a pre-seeded board can clear more than four rows at once; such a
/// sweep is paid as a four-row clear.
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    let base_score = LINE_SCORES[lines.min(LINE_SCORES.len()) - 1];
    base_score.saturating_mul(level.saturating_add(1))
}

/// Level management
/// Level increases every 10 lines cleared
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_line_scores() {
        // Level 0
        assert_eq!(calculate_line_score(1, 0), 40);
        assert_eq!(calculate_line_score(2, 0), 100);
        assert_eq!(calculate_line_score(3, 0), 300);
        assert_eq!(calculate_line_score(4, 0), 1200);

        // Level 5
        assert_eq!(calculate_line_score(1, 5), 40 * 6);
        assert_eq!(calculate_line_score(4, 5), 1200 * 6);
    }

    #[test]
    fn test_no_lines_no_points() {
        assert_eq!(calculate_line_score(0, 0), 0);
        assert_eq!(calculate_line_score(0, 9), 0);
    }

    #[test]
    fn test_oversized_clear_is_capped() {
        assert_eq!(calculate_line_score(19, 0), 1200);
        assert_eq!(calculate_line_score(5, 1), 2400);
    }

    #[test]
    fn test_score_saturates() {
        assert_eq!(calculate_line_score(4, u32::MAX), u32::MAX);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0), 0);
        assert_eq!(calculate_level(9), 0);
        assert_eq!(calculate_level(10), 1);
        assert_eq!(calculate_level(29), 2);
        assert_eq!(calculate_level(100), 10);
    }
}
