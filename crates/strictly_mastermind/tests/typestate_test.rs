//! Tests for the typestate game architecture.

use strictly_mastermind::{Code, GameConfig, GameInProgress, GameResult, GameSetup, GuessError, Outcome};

fn code(s: &str) -> Code {
    s.parse().expect("valid code")
}

fn setup(secret: &str, max_turns: u32) -> GameSetup {
    let config = GameConfig::new(secret.len(), max_turns).expect("valid config");
    GameSetup::with_secret(config, code(secret)).expect("valid secret")
}

#[test]
fn test_typestate_lifecycle() {
    let game = setup("2468", 10).start();
    assert_eq!(game.turn_count(), 0);

    let game = match game.guess(code("2000")).expect("valid guess") {
        GameResult::InProgress(g) => g,
        GameResult::Finished(_) => panic!("Game shouldn't finish after one guess"),
    };
    assert_eq!(game.turn_count(), 1);
    assert_eq!(game.history()[0].score().position(), 1);

    match game.guess(code("2468")).expect("valid guess") {
        GameResult::Finished(g) => {
            assert_eq!(g.outcome(), Outcome::Won);
            assert_eq!(g.turn_count(), 2);
        }
        GameResult::InProgress(_) => panic!("Game should be finished"),
    }
}

#[test]
fn test_replay_to_exhaustion() {
    let guesses = vec![code("1111"), code("2222"), code("3333")];
    let result = GameInProgress::replay(setup("4444", 3), &guesses).expect("valid replay");

    match result {
        GameResult::Finished(game) => {
            assert_eq!(game.outcome(), Outcome::Exhausted);
            assert_eq!(game.history().len(), 3);
            let summary = game.summary();
            assert_eq!(*summary.turns_used(), 3);
            assert!(!*summary.success());
        }
        GameResult::InProgress(_) => panic!("Game should be finished"),
    }
}

#[test]
fn test_replay_partial_game() {
    let guesses = vec![code("1111"), code("2222")];
    let result = GameInProgress::replay(setup("4444", 5), &guesses).expect("valid replay");
    assert!(!result.is_finished());
    assert_eq!(result.last_entry().map(|e| *e.turn()), Some(2));
}

#[test]
fn test_wrong_length_guess_rejected() {
    let game = setup("4444", 5).start();
    assert!(matches!(
        game.guess(code("44444")),
        Err(GuessError::WrongLength { expected: 4, actual: 5 })
    ));
}

#[test]
fn test_restart_after_finish() {
    let result = GameInProgress::replay(setup("4444", 5), &[code("4444")]).expect("valid replay");
    if let GameResult::Finished(game) = result {
        let game = game.restart().start();
        assert_eq!(game.turn_count(), 0);
        assert!(game.history().is_empty());
    } else {
        panic!("Game should be finished");
    }
}
