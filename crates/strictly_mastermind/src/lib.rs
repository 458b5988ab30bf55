//! Strictly Mastermind - type-safe number-guessing game logic.
//!
//! The player tries to find a secret code of decimal digits (repeats allowed).
//! Every accepted guess is scored by two figures:
//!
//! - **count**: digits present in the secret, each secret digit credited at most once
//! - **position**: digits matching the secret at the same index
//!
//! The game ends when a guess matches every position or the turn budget runs out.
//!
//! # Architecture
//!
//! - **Scorer**: pure [`score`] function, exact matches consumed first
//! - **Validation**: [`validate`] turns raw player input into a [`Code`]
//! - **Typestate**: [`GameSetup`] → [`GameInProgress`] → [`GameFinished`]
//! - **Contracts**: pre/postconditions backed by composable invariants
//! - **Session**: [`Session`], the owned wrapper front ends hold per player
//!
//! # Example
//!
//! ```
//! use strictly_mastermind::{Code, GameConfig, Reveal, Session};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let secret: Code = "5927".parse()?;
//! let mut session = Session::with_secret(GameConfig::default(), secret)?;
//!
//! let report = session.submit_guess("5328")?;
//! assert_eq!(report.score().position(), 2);
//! assert_eq!(report.score().count(), 2);
//!
//! let snapshot = session.snapshot(Reveal::Hidden);
//! assert!(snapshot.secret().is_none());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod contracts;
mod error;
pub mod invariants;
mod phases;
mod rules;
mod session;
mod types;
mod typestate;
mod validation;

pub use config::{ConfigError, GameConfig, DEFAULT_CODE_LENGTH, DEFAULT_MAX_TURNS, MAX_CODE_LENGTH};
pub use contracts::{Contract, GuessContract, LengthMatches};
pub use error::GuessError;
pub use phases::{GameSummary, Outcome};
pub use rules::{check_outcome, is_exhausted, is_win, score};
pub use session::{GuessReport, Reveal, Session, SessionSnapshot};
pub use types::{Code, Digit, HistoryEntry, InvalidDigit, Score};
pub use typestate::{GameFinished, GameInProgress, GameRecord, GameResult, GameSetup};
pub use validation::{validate, validate_digits};
