//! Phase-specific typestate structs for mastermind.
//!
//! Each phase is its own type. Only [`GameInProgress`] can accept a guess,
//! and a [`GameFinished`] always carries an [`Outcome`], never `Option<Outcome>`.

use crate::config::GameConfig;
use crate::contracts::{Contract, GuessContract};
use crate::error::GuessError;
use crate::phases::{GameSummary, Outcome};
use crate::rules::{check_outcome, score};
use crate::types::{Code, HistoryEntry};
use rand::Rng;
use tracing::{debug, info, instrument, warn};

/// Read access shared by phases that carry a guess history.
pub trait GameRecord {
    /// The game's configuration.
    fn config(&self) -> &GameConfig;

    /// Accepted guesses so far.
    fn turn_count(&self) -> u32;

    /// Scored guesses in turn order.
    fn history(&self) -> &[HistoryEntry];
}

// ─────────────────────────────────────────────────────────────
//  Setup Phase
// ─────────────────────────────────────────────────────────────

/// Game in setup phase: the secret is drawn, nothing has been guessed.
#[derive(Debug, Clone)]
pub struct GameSetup {
    config: GameConfig,
    secret: Code,
}

impl GameSetup {
    /// Creates a game with a secret from the thread-local generator.
    #[instrument]
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, &mut rand::thread_rng())
    }

    /// Creates a game with a secret drawn from `rng`.
    #[instrument(skip(rng))]
    pub fn with_rng<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Self {
        let secret = Code::random(rng, *config.code_length());
        info!(code_length = config.code_length(), "Drew new secret");
        Self { config, secret }
    }

    /// Creates a game with a known secret.
    ///
    /// # Errors
    ///
    /// Returns `GuessError::WrongLength` if the secret does not match the
    /// configured code length.
    #[instrument(skip(secret))]
    pub fn with_secret(config: GameConfig, secret: Code) -> Result<Self, GuessError> {
        if secret.len() != *config.code_length() {
            warn!(
                expected = config.code_length(),
                actual = secret.len(),
                "Secret has wrong length"
            );
            return Err(GuessError::WrongLength {
                expected: *config.code_length(),
                actual: secret.len(),
            });
        }
        Ok(Self { config, secret })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Starts the game (consumes setup, returns in-progress).
    #[instrument(skip(self))]
    pub fn start(self) -> GameInProgress {
        GameInProgress {
            config: self.config,
            secret: self.secret,
            turn_count: 0,
            history: Vec::new(),
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  InProgress Phase
// ─────────────────────────────────────────────────────────────

/// Game in progress: accepts guesses.
#[derive(Debug, Clone)]
pub struct GameInProgress {
    pub(crate) config: GameConfig,
    pub(crate) secret: Code,
    pub(crate) turn_count: u32,
    pub(crate) history: Vec<HistoryEntry>,
}

impl GameInProgress {
    /// Scores a guess, consuming self and transitioning to the next state.
    ///
    /// Preconditions are always checked; postconditions only in debug builds.
    ///
    /// # Errors
    ///
    /// Returns `GuessError::WrongLength` if the guess does not match the
    /// configured code length.
    #[instrument(skip(self), fields(turn = self.turn_count + 1))]
    pub fn guess(self, guess: Code) -> Result<GameResult, GuessError> {
        GuessContract::pre(&self, &guess)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let mut game = self;
        let result = score(&game.secret, &guess);
        game.turn_count += 1;
        game.history
            .push(HistoryEntry::new(game.turn_count, guess, result));
        debug!(
            count = result.count(),
            position = result.position(),
            "Guess scored"
        );

        if let Some(outcome) = check_outcome(&result, game.turn_count, &game.config) {
            info!(%outcome, turns = game.turn_count, "Game finished");
            let finished = GameFinished {
                config: game.config,
                secret: game.secret,
                turn_count: game.turn_count,
                history: game.history,
                outcome,
            };

            #[cfg(debug_assertions)]
            GuessContract::post_finish(&before, &finished)?;

            return Ok(GameResult::Finished(finished));
        }

        #[cfg(debug_assertions)]
        GuessContract::post(&before, &game)?;

        Ok(GameResult::InProgress(game))
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Accepted guesses so far.
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    /// Guesses left before the budget runs out.
    pub fn turns_remaining(&self) -> u32 {
        self.config.max_turns().saturating_sub(self.turn_count)
    }

    /// Returns the guess history.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// The most recent guess, if any.
    pub fn last_guess(&self) -> Option<&Code> {
        self.history.last().map(|entry| entry.guess())
    }

    pub(crate) fn secret(&self) -> &Code {
        &self.secret
    }

    /// Replays guesses against a prepared game.
    ///
    /// # Errors
    ///
    /// Propagates the first rejected guess, and returns
    /// `GuessError::SessionTerminated` if guesses remain after the game ends.
    #[instrument(skip(setup))]
    pub fn replay(setup: GameSetup, guesses: &[Code]) -> Result<GameResult, GuessError> {
        let mut game = setup.start();

        for (i, guess) in guesses.iter().enumerate() {
            match game.guess(guess.clone())? {
                GameResult::InProgress(g) => game = g,
                GameResult::Finished(g) => {
                    if i + 1 < guesses.len() {
                        warn!(remaining = guesses.len() - i - 1, "Guesses left after game ended");
                        return Err(GuessError::SessionTerminated);
                    }
                    return Ok(GameResult::Finished(g));
                }
            }
        }

        Ok(GameResult::InProgress(game))
    }
}

impl GameRecord for GameInProgress {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn turn_count(&self) -> u32 {
        self.turn_count
    }

    fn history(&self) -> &[HistoryEntry] {
        &self.history
    }
}

// ─────────────────────────────────────────────────────────────
//  Finished Phase
// ─────────────────────────────────────────────────────────────

/// Game finished: outcome determined, no more guesses.
#[derive(Debug, Clone)]
pub struct GameFinished {
    pub(crate) config: GameConfig,
    pub(crate) secret: Code,
    pub(crate) turn_count: u32,
    pub(crate) history: Vec<HistoryEntry>,
    pub(crate) outcome: Outcome,
}

impl GameFinished {
    /// Returns the outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Accepted guesses.
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    /// Returns the guess history.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// The final guess.
    pub fn last_guess(&self) -> Option<&Code> {
        self.history.last().map(|entry| entry.guess())
    }

    pub(crate) fn secret(&self) -> &Code {
        &self.secret
    }

    /// End-of-game statistics.
    pub fn summary(&self) -> GameSummary {
        GameSummary::new(self.outcome, self.turn_count, *self.config.max_turns())
    }

    /// Restarts with a fresh secret (consumes finished, returns setup).
    #[instrument(skip(self))]
    pub fn restart(self) -> GameSetup {
        GameSetup::new(self.config)
    }

    /// Restarts with a fresh secret drawn from `rng`.
    #[instrument(skip(self, rng))]
    pub fn restart_with_rng<R: Rng + ?Sized>(self, rng: &mut R) -> GameSetup {
        GameSetup::with_rng(self.config, rng)
    }
}

impl GameRecord for GameFinished {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn turn_count(&self) -> u32 {
        self.turn_count
    }

    fn history(&self) -> &[HistoryEntry] {
        &self.history
    }
}

// ─────────────────────────────────────────────────────────────
//  Result Type
// ─────────────────────────────────────────────────────────────

/// Result of scoring a guess.
#[derive(Debug)]
pub enum GameResult {
    /// Game continues.
    InProgress(GameInProgress),
    /// Game finished.
    Finished(GameFinished),
}

impl GameResult {
    /// The entry recorded by the latest guess.
    pub fn last_entry(&self) -> Option<&HistoryEntry> {
        match self {
            GameResult::InProgress(g) => g.history().last(),
            GameResult::Finished(g) => g.history().last(),
        }
    }

    /// True if the game ended.
    pub fn is_finished(&self) -> bool {
        matches!(self, GameResult::Finished(_))
    }
}
