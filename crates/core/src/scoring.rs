//! Scoring module - line-clear points and per-lock reward

use crate::types::{GAME_OVER_REWARD, LINE_SCORES};

/// Points awarded for clearing `lines` rows with one lock
///
/// Only boards restored through `Board::set_state` can clear more than four rows at once;
/// those clears score as a four-line clear.
pub fn line_clear_score(lines: u32) -> u32 {
    let idx = (lines as usize).min(LINE_SCORES.len() - 1);
    LINE_SCORES[idx]
}

/// Reward for a single lock
///
/// Squaring the line count makes one four-line clear (16) worth more than four
/// single clears (4).
pub fn calculate_reward(lines_cleared: u32, is_game_over: bool) -> i32 {
    if is_game_over {
        return GAME_OVER_REWARD;
    }
    let lines = lines_cleared as i32;
    lines * lines
}
