//! Scoring module - line clear rewards, level progression and gravity speed
//!
//! Rules:
//! - A lock that clears `n` rows earns `LINE_SCORES[n - 1] * level`, using the level held
//!   before the clear is counted.
//! - `level = lines / 10 + 1`.
//! - Gravity interval is `1000 * 0.85^(level - 1)` ms, never below one frame.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_FLOOR_MS, DROP_SPEEDUP, LINES_PER_LEVEL, LINE_SCORES,
};

/// Outcome of applying a line clear to the running totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub points: u32,
    pub lines: u32,
    pub level: u32,
    pub level_up: bool,
}

/// Reward for clearing `rows` rows at `level`.
///
/// Zero rows earn nothing; more than four (custom matrices) earn the four-row reward.
pub fn line_clear_score(rows: u32, level: u32) -> u32 {
    if rows == 0 {
        return 0;
    }
    let idx = (rows as usize).min(LINE_SCORES.len()) - 1;
    LINE_SCORES[idx].saturating_mul(level)
}

/// Level reached after `lines` total cleared rows.
pub fn calculate_level(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + 1
}

/// Gravity interval in milliseconds for a level.
///
/// ```
/// use blockfall_core::scoring::drop_interval_ms;
///
/// assert_eq!(drop_interval_ms(1), 1000.0);
/// assert!((drop_interval_ms(2) - 850.0).abs() < 1e-9);
/// assert_eq!(drop_interval_ms(500), 16.0);
/// ```
pub fn drop_interval_ms(level: u32) -> f64 {
    let exp = level.saturating_sub(1).min(i32::MAX as u32) as i32;
    (BASE_DROP_MS * DROP_SPEEDUP.powi(exp)).max(DROP_INTERVAL_FLOOR_MS)
}

/// True if going from `before` to `after` total lines crosses a level boundary.
pub fn crossed_level_boundary(before: u32, after: u32) -> bool {
    before / LINES_PER_LEVEL != after / LINES_PER_LEVEL
}

/// Apply `rows` cleared rows to the current totals.
pub fn apply_line_clear(rows: u32, lines: u32, level: u32) -> ScoreResult {
    let points = line_clear_score(rows, level);
    let new_lines = lines.saturating_add(rows);
    ScoreResult {
        points,
        lines: new_lines,
        level: calculate_level(new_lines),
        level_up: crossed_level_boundary(lines, new_lines),
    }
}
