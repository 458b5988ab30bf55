//! Turn count invariant: one history entry per accepted guess.

use super::Invariant;
use crate::typestate::GameRecord;

/// Invariant: turn count equals history length.
pub struct TurnCountInvariant;

impl<S: GameRecord> Invariant<S> for TurnCountInvariant {
    fn holds(state: &S) -> bool {
        usize::try_from(state.turn_count()).is_ok_and(|turns| turns == state.history().len())
    }

    fn description() -> &'static str {
        "Turn count equals history length"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Code, GameConfig, GameResult, GameSetup};

    #[test]
    fn test_holds_through_a_game() {
        let secret: Code = "1234".parse().unwrap();
        let mut game = GameSetup::with_secret(GameConfig::default(), secret)
            .unwrap()
            .start();
        assert!(TurnCountInvariant::holds(&game));

        for guess in ["0000", "1111", "2222"] {
            game = match game.guess(guess.parse().unwrap()).unwrap() {
                GameResult::InProgress(g) => g,
                GameResult::Finished(_) => panic!("Game shouldn't finish"),
            };
            assert!(TurnCountInvariant::holds(&game));
        }
    }

    #[test]
    fn test_dropped_entry_violates() {
        let secret: Code = "1234".parse().unwrap();
        let game = GameSetup::with_secret(GameConfig::default(), secret)
            .unwrap()
            .start();
        let Ok(GameResult::InProgress(mut game)) = game.guess("5555".parse().unwrap()) else {
            panic!("Expected in-progress game");
        };
        game.history.clear();
        assert!(!TurnCountInvariant::holds(&game));
    }
}
