//! Active budget invariant: an in-progress game has not yet ended.

use super::Invariant;
use crate::typestate::GameInProgress;

/// Invariant: an in-progress game is under its turn budget and holds no winning guess.
pub struct ActiveBudgetInvariant;

impl Invariant<GameInProgress> for ActiveBudgetInvariant {
    fn holds(game: &GameInProgress) -> bool {
        let length = *game.config().code_length();
        game.turn_count() < *game.config().max_turns()
            && !game.history().iter().any(|e| e.score().is_exact(length))
    }

    fn description() -> &'static str {
        "In-progress game is under budget and unsolved"
    }
}
