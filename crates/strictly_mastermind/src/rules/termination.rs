//! Win and exhaustion detection.

use crate::config::GameConfig;
use crate::phases::Outcome;
use crate::types::Score;
use tracing::instrument;

/// True when the score matched every position.
#[instrument]
pub fn is_win(score: &Score, code_length: usize) -> bool {
    score.is_exact(code_length)
}

/// True when `turns_used` has reached the budget.
#[instrument]
pub fn is_exhausted(turns_used: u32, max_turns: u32) -> bool {
    turns_used >= max_turns
}

/// Decides whether the guess scored on turn `turns_used` ends the game.
///
/// The win check runs first, so a winning final guess is a win.
#[instrument]
pub fn check_outcome(score: &Score, turns_used: u32, config: &GameConfig) -> Option<Outcome> {
    if is_win(score, *config.code_length()) {
        Some(Outcome::Won)
    } else if is_exhausted(turns_used, *config.max_turns()) {
        Some(Outcome::Exhausted)
    } else {
        None
    }
}
