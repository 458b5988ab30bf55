//! Contract-based validation for mastermind.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P} guess {Q}

use crate::error::GuessError;
use crate::invariants::{ActiveInvariants, FinishedInvariants, InvariantSet, InvariantViolation};
use crate::types::Code;
use crate::typestate::{GameFinished, GameInProgress};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), GuessError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), GuessError>;
}

// ─────────────────────────────────────────────────────────────
//  Guess Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the guess has the configured code length.
pub struct LengthMatches;

impl LengthMatches {
    /// Checks the guess length against the game's configuration.
    #[instrument(skip(game))]
    pub fn check(guess: &Code, game: &GameInProgress) -> Result<(), GuessError> {
        let expected = *game.config().code_length();
        if guess.len() != expected {
            warn!(expected, actual = guess.len(), "Guess length mismatch");
            Err(GuessError::WrongLength {
                expected,
                actual: guess.len(),
            })
        } else {
            Ok(())
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Guess Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for guess actions.
///
/// Preconditions:
/// - Guess length equals the code length
///
/// Postconditions:
/// - Exactly one turn consumed and one entry appended
/// - Earlier history untouched
/// - The resulting phase satisfies its invariant set
pub struct GuessContract;

impl GuessContract {
    /// Postcondition for a guess that ended the game.
    #[instrument(skip_all)]
    pub fn post_finish(before: &GameInProgress, after: &GameFinished) -> Result<(), GuessError> {
        check_append(before, after.turn_count(), after.history())?;
        FinishedInvariants::check_all(after).map_err(violation_error)
    }
}

impl Contract<GameInProgress, Code> for GuessContract {
    fn pre(game: &GameInProgress, guess: &Code) -> Result<(), GuessError> {
        LengthMatches::check(guess, game)
    }

    fn post(before: &GameInProgress, after: &GameInProgress) -> Result<(), GuessError> {
        check_append(before, after.turn_count(), after.history())?;
        ActiveInvariants::check_all(after).map_err(violation_error)
    }
}

fn check_append(
    before: &GameInProgress,
    turn_count: u32,
    history: &[crate::types::HistoryEntry],
) -> Result<(), GuessError> {
    if turn_count != before.turn_count() + 1 {
        return Err(GuessError::InvariantViolation(format!(
            "Postcondition failed: turn count went from {} to {}",
            before.turn_count(),
            turn_count
        )));
    }
    if !history.starts_with(before.history()) {
        return Err(GuessError::InvariantViolation(
            "Postcondition failed: earlier history was modified".to_string(),
        ));
    }
    Ok(())
}

fn violation_error(violations: Vec<InvariantViolation>) -> GuessError {
    let descriptions = violations
        .iter()
        .map(|v| v.description.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    warn!(%descriptions, "Invariant violated");
    GuessError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::types::Score;
    use crate::typestate::{GameResult, GameSetup};

    fn code(s: &str) -> Code {
        s.parse().unwrap()
    }

    fn start(secret: &str) -> GameInProgress {
        GameSetup::with_secret(GameConfig::new(4, 10).unwrap(), code(secret))
            .unwrap()
            .start()
    }

    #[test]
    fn test_precondition_accepts_matching_length() {
        let game = start("1234");
        assert!(GuessContract::pre(&game, &code("4321")).is_ok());
    }

    #[test]
    fn test_precondition_rejects_long_guess() {
        let game = start("1234");
        assert!(matches!(
            GuessContract::pre(&game, &code("43210")),
            Err(GuessError::WrongLength { .. })
        ));
    }

    #[test]
    fn test_postcondition_holds_after_guess() {
        let game = start("1234");
        if let Ok(GameResult::InProgress(after)) = game.clone().guess(code("1111")) {
            assert!(GuessContract::post(&game, &after).is_ok());
        } else {
            panic!("Expected in-progress game");
        }
    }

    #[test]
    fn test_postcondition_detects_rewritten_history() {
        let game = start("1234");
        let Ok(GameResult::InProgress(game)) = game.guess(code("1111")) else {
            panic!("Expected in-progress game");
        };
        let Ok(GameResult::InProgress(mut after)) = game.clone().guess(code("2222")) else {
            panic!("Expected in-progress game");
        };

        after.history[0] = crate::types::HistoryEntry::new(1, code("9999"), Score::new(0, 0));
        assert!(GuessContract::post(&game, &after).is_err());
    }

    #[test]
    fn test_postcondition_detects_skipped_turn() {
        let game = start("1234");
        let Ok(GameResult::InProgress(mut after)) = game.clone().guess(code("5555")) else {
            panic!("Expected in-progress game");
        };
        after.turn_count += 1;
        assert!(GuessContract::post(&game, &after).is_err());
    }
}
