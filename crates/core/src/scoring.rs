//! Scoring module - points for rows cleared in one pass

use crate::types::LINE_SCORES;

/// Points for clearing `lines` rows in a single pass.
///
/// More than four rows can only come from a seeded board; those score as four.
pub fn calculate_line_score(lines: usize) -> u32 {
    LINE_SCORES[lines.min(LINE_SCORES.len() - 1)]
}
