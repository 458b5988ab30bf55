//! Terminal outcome invariant: the recorded outcome agrees with the history.

use super::Invariant;
use crate::phases::Outcome;
use crate::typestate::GameFinished;

/// Invariant: only the final guess may be exact.
///
/// `Won` means the final guess matched every position. `Exhausted` means the
/// budget is used up and no guess matched.
pub struct TerminalOutcomeInvariant;

impl Invariant<GameFinished> for TerminalOutcomeInvariant {
    fn holds(game: &GameFinished) -> bool {
        let length = *game.config().code_length();
        let Some((last, earlier)) = game.history().split_last() else {
            return false;
        };
        if earlier.iter().any(|e| e.score().is_exact(length)) {
            return false;
        }
        match game.outcome() {
            Outcome::Won => last.score().is_exact(length),
            Outcome::Exhausted => {
                !last.score().is_exact(length) && game.turn_count() == *game.config().max_turns()
            }
        }
    }

    fn description() -> &'static str {
        "Outcome matches the final guess and turn budget"
    }
}
