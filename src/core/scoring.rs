//! Scoring module - line-clear points, level progression, gravity speed
//!
//! Classic single-player rules: only line clears score. Points are the
//! per-clear table value multiplied by the level in force when the clear
//! happens (before the level is recomputed from the new line total).

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, LINES_PER_LEVEL, LINE_SCORES,
};

/// Points for clearing `lines` rows at once at the given level.
///
/// `level` is 1-based. Zero lines (a lock with no clear) scores zero.
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines] * level
}

/// Level for a total line count: one level per 10 lines, starting at 1.
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level: 1000ms at level 1, 100ms faster per
/// level, floored at 100ms.
pub fn drop_interval_ms(level: u32) -> u32 {
    BASE_DROP_MS
        .saturating_sub(level.saturating_sub(1).saturating_mul(DROP_STEP_MS))
        .max(DROP_INTERVAL_MIN_MS)
}
