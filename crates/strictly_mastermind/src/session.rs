//! Owned game session: the value front ends hold per player.
//!
//! A [`Session`] wraps whichever typestate phase the game is in and exposes
//! the dynamic operations a front end needs: submit a raw guess, take a
//! snapshot, reset. There is no global state; the caller owns the session
//! and decides how to key it.

use crate::config::GameConfig;
use crate::error::GuessError;
use crate::phases::{GameSummary, Outcome};
use crate::types::{Code, HistoryEntry, Score};
use crate::typestate::{GameFinished, GameInProgress, GameResult, GameSetup};
use crate::validation::{validate, validate_digits};
use derive_getters::Getters;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Whether a snapshot may disclose the secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reveal {
    /// Secret withheld.
    #[default]
    Hidden,
    /// Secret included (debugging and tests).
    Secret,
}

impl From<bool> for Reveal {
    fn from(reveal: bool) -> Self {
        if reveal { Reveal::Secret } else { Reveal::Hidden }
    }
}

#[derive(Debug, Clone)]
enum Phase {
    InProgress(GameInProgress),
    Finished(GameFinished),
}

impl From<GameResult> for Phase {
    fn from(result: GameResult) -> Self {
        match result {
            GameResult::InProgress(g) => Phase::InProgress(g),
            GameResult::Finished(g) => Phase::Finished(g),
        }
    }
}

/// One game: secret, turn counter, history and game-over state.
#[derive(Debug, Clone)]
pub struct Session {
    phase: Phase,
}

/// Read-only view of a session for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct SessionSnapshot {
    /// Digits per code.
    code_length: usize,
    /// Accepted guesses so far.
    turn_count: u32,
    /// Turn budget.
    max_turns: u32,
    /// Guesses left.
    turns_remaining: u32,
    /// Whether the game has ended.
    game_over: bool,
    /// Why the game ended, once it has.
    outcome: Option<Outcome>,
    /// Scored guesses in turn order.
    history: Vec<HistoryEntry>,
    /// Most recent guess.
    last_guess: Option<Code>,
    /// The secret; present only when requested with [`Reveal::Secret`].
    secret: Option<Code>,
    /// End-of-game statistics, once the game has ended.
    summary: Option<GameSummary>,
}

/// Result of an accepted guess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct GuessReport {
    /// Turn number the guess was recorded under.
    turn: u32,
    /// Feedback for the guess.
    score: Score,
    /// State after the guess, secret hidden.
    snapshot: SessionSnapshot,
}

impl Session {
    /// Creates a session with a freshly drawn secret.
    #[instrument]
    pub fn new(config: GameConfig) -> Self {
        Self::from_setup(GameSetup::new(config))
    }

    /// Creates a session with a secret drawn from `rng`.
    #[instrument(skip(rng))]
    pub fn with_rng<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Self {
        Self::from_setup(GameSetup::with_rng(config, rng))
    }

    /// Creates a session with a known secret.
    ///
    /// # Errors
    ///
    /// Returns `GuessError::WrongLength` if the secret does not match the
    /// configured code length.
    #[instrument(skip(secret))]
    pub fn with_secret(config: GameConfig, secret: Code) -> Result<Self, GuessError> {
        Ok(Self::from_setup(GameSetup::with_secret(config, secret)?))
    }

    fn from_setup(setup: GameSetup) -> Self {
        info!(
            code_length = setup.config().code_length(),
            max_turns = setup.config().max_turns(),
            "Session started"
        );
        Self {
            phase: Phase::InProgress(setup.start()),
        }
    }

    /// Validates and scores a raw guess.
    ///
    /// # Errors
    ///
    /// `GuessError::SessionTerminated` once the game is over, checked before
    /// the input; otherwise the first failed validation rule. Rejected
    /// guesses leave the session untouched.
    #[instrument(skip(self))]
    pub fn submit_guess(&mut self, raw: &str) -> Result<GuessReport, GuessError> {
        let code_length = *self.active()?.config().code_length();
        let guess = validate(raw, code_length)?;
        self.submit_code(guess)
    }

    /// Validates and scores a guess given as numeric digits.
    ///
    /// # Errors
    ///
    /// Same as [`Session::submit_guess`], with `DigitOutOfRange` for values above 9.
    #[instrument(skip(self))]
    pub fn submit_digits(&mut self, digits: &[u8]) -> Result<GuessReport, GuessError> {
        let code_length = *self.active()?.config().code_length();
        let guess = validate_digits(digits, code_length)?;
        self.submit_code(guess)
    }

    /// Scores an already-parsed guess.
    ///
    /// # Errors
    ///
    /// `GuessError::SessionTerminated` once the game is over, or
    /// `GuessError::WrongLength` if the code has the wrong length.
    #[instrument(skip(self))]
    pub fn submit_code(&mut self, guess: Code) -> Result<GuessReport, GuessError> {
        let game = self.active()?.clone();
        let result = game.guess(guess)?;

        let entry = result.last_entry().cloned().ok_or_else(|| {
            GuessError::InvariantViolation("Accepted guess left no history entry".to_string())
        })?;
        self.phase = result.into();

        if let Phase::Finished(finished) = &self.phase {
            info!(outcome = %finished.outcome(), turns = finished.turn_count(), "Session over");
        }

        Ok(GuessReport {
            turn: *entry.turn(),
            score: *entry.score(),
            snapshot: self.snapshot(Reveal::Hidden),
        })
    }

    /// Discards this session and starts a new one with a fresh secret.
    #[instrument(skip(self))]
    pub fn reset(self) -> Self {
        info!("Resetting session");
        match self.phase {
            Phase::InProgress(g) => Self::new(*g.config()),
            Phase::Finished(g) => Self::from_setup(g.restart()),
        }
    }

    /// Like [`Session::reset`], drawing the new secret from `rng`.
    #[instrument(skip(self, rng))]
    pub fn reset_with_rng<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        info!("Resetting session");
        match self.phase {
            Phase::InProgress(g) => Self::with_rng(*g.config(), rng),
            Phase::Finished(g) => Self::from_setup(g.restart_with_rng(rng)),
        }
    }

    /// Read-only view of the session; the secret is included only under [`Reveal::Secret`].
    #[instrument(skip(self))]
    pub fn snapshot(&self, reveal: Reveal) -> SessionSnapshot {
        let config = self.config();
        let turn_count = self.turn_count();
        SessionSnapshot {
            code_length: *config.code_length(),
            turn_count,
            max_turns: *config.max_turns(),
            turns_remaining: config.max_turns().saturating_sub(turn_count),
            game_over: self.is_game_over(),
            outcome: self.outcome(),
            history: self.history().to_vec(),
            last_guess: self.last_guess().cloned(),
            secret: match reveal {
                Reveal::Secret => Some(self.secret().clone()),
                Reveal::Hidden => None,
            },
            summary: self.summary(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GameConfig {
        match &self.phase {
            Phase::InProgress(g) => g.config(),
            Phase::Finished(g) => g.config(),
        }
    }

    /// True once the game has been won or the budget exhausted.
    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    /// Why the game ended, if it has.
    pub fn outcome(&self) -> Option<Outcome> {
        match &self.phase {
            Phase::InProgress(_) => None,
            Phase::Finished(g) => Some(g.outcome()),
        }
    }

    /// End-of-game statistics, if the game has ended.
    pub fn summary(&self) -> Option<GameSummary> {
        match &self.phase {
            Phase::InProgress(_) => None,
            Phase::Finished(g) => Some(g.summary()),
        }
    }

    /// Accepted guesses so far.
    pub fn turn_count(&self) -> u32 {
        match &self.phase {
            Phase::InProgress(g) => g.turn_count(),
            Phase::Finished(g) => g.turn_count(),
        }
    }

    /// Scored guesses in turn order.
    pub fn history(&self) -> &[HistoryEntry] {
        match &self.phase {
            Phase::InProgress(g) => g.history(),
            Phase::Finished(g) => g.history(),
        }
    }

    /// Most recent guess.
    pub fn last_guess(&self) -> Option<&Code> {
        match &self.phase {
            Phase::InProgress(g) => g.last_guess(),
            Phase::Finished(g) => g.last_guess(),
        }
    }

    fn secret(&self) -> &Code {
        match &self.phase {
            Phase::InProgress(g) => g.secret(),
            Phase::Finished(g) => g.secret(),
        }
    }

    fn active(&self) -> Result<&GameInProgress, GuessError> {
        match &self.phase {
            Phase::InProgress(g) => Ok(g),
            Phase::Finished(_) => {
                warn!("Guess submitted after game over");
                Err(GuessError::SessionTerminated)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn code(s: &str) -> Code {
        s.parse().unwrap()
    }

    fn session(secret: &str, max_turns: u32) -> Session {
        let config = GameConfig::new(secret.len(), max_turns).unwrap();
        Session::with_secret(config, code(secret)).unwrap()
    }

    #[test]
    fn test_report_carries_score_and_state() {
        let mut session = session("5927", 10);
        let report = session.submit_guess("5328").unwrap();
        assert_eq!(*report.turn(), 1);
        assert_eq!(*report.score(), Score::new(2, 2));
        assert_eq!(*report.snapshot().turn_count(), 1);
        assert!(!*report.snapshot().game_over());
        assert!(report.snapshot().secret().is_none());
    }

    #[test]
    fn test_terminated_checked_before_validation() {
        let mut session = session("1234", 10);
        session.submit_guess("1234").unwrap();
        assert_eq!(session.submit_guess("abc"), Err(GuessError::SessionTerminated));
        assert_eq!(session.submit_digits(&[1, 2, 3, 4]), Err(GuessError::SessionTerminated));
    }

    #[test]
    fn test_reveal_gates_secret() {
        let session = session("0707", 10);
        assert_eq!(session.snapshot(Reveal::Hidden).secret(), &None);
        assert_eq!(session.snapshot(Reveal::Secret).secret(), &Some(code("0707")));
        assert_eq!(Reveal::from(true), Reveal::Secret);
    }

    #[test]
    fn test_seeded_sessions_share_secret() {
        let config = GameConfig::default();
        let a = Session::with_rng(config, &mut StdRng::seed_from_u64(9));
        let b = Session::with_rng(config, &mut StdRng::seed_from_u64(9));
        assert_eq!(
            a.snapshot(Reveal::Secret).secret(),
            b.snapshot(Reveal::Secret).secret()
        );
    }

    #[test]
    fn test_numeric_digits_path() {
        let mut session = session("1234", 10);
        assert_eq!(
            session.submit_digits(&[1, 2, 3, 40]),
            Err(GuessError::DigitOutOfRange { digit: 40, index: 3 })
        );
        assert_eq!(session.turn_count(), 0);
        let report = session.submit_digits(&[4, 3, 2, 1]).unwrap();
        assert_eq!(*report.score(), Score::new(4, 0));
    }

    #[test]
    fn test_summary_present_after_game_over() {
        let mut session = session("1234", 4);
        assert!(session.summary().is_none());
        session.submit_guess("1234").unwrap();
        let summary = session.summary().unwrap();
        assert_eq!(*summary.turns_used(), 1);
        assert_eq!(*summary.budget_used_percent(), 25.0);
        assert_eq!(*summary.efficiency_percent(), 75.0);
    }
}
