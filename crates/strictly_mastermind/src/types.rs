//! Core domain types for mastermind.

use crate::error::GuessError;
use derive_getters::Getters;
use derive_more::Display;
use derive_new::new;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// A single decimal digit (0-9).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    /// Largest value a digit can hold.
    pub const MAX: u8 = 9;

    /// Creates a digit, or `None` if the value is above 9.
    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX).then_some(Self(value))
    }

    /// Returns the numeric value.
    pub fn value(self) -> u8 {
        self.0
    }
}

/// Rejected attempt to build a [`Digit`] from a value above 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display("Digit {_0} is outside 0-9")]
pub struct InvalidDigit(pub u8);

impl std::error::Error for InvalidDigit {}

impl TryFrom<u8> for Digit {
    type Error = InvalidDigit;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(InvalidDigit(value))
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

/// An ordered sequence of digits: either the secret or one guess.
///
/// Codes are immutable once built. Length is checked against the game
/// configuration when a code enters a game, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Code {
    digits: Vec<Digit>,
}

impl Code {
    /// Creates a code from digits, most significant first.
    pub fn new(digits: Vec<Digit>) -> Self {
        Self { digits }
    }

    /// Draws a code of `length` digits, each digit an independent uniform draw.
    #[instrument(skip(rng))]
    pub fn random<R: Rng + ?Sized>(rng: &mut R, length: usize) -> Self {
        let digits = (0..length)
            .map(|_| Digit(rng.gen_range(0..=Digit::MAX)))
            .collect();
        Self { digits }
    }

    /// Returns the digits in order.
    pub fn digits(&self) -> &[Digit] {
        &self.digits
    }

    /// Number of digits.
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// True when the code has no digits.
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Formats the digits separated by spaces, e.g. `0 0 1 2`.
    pub fn spaced(&self) -> String {
        self.digits
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for digit in &self.digits {
            write!(f, "{}", digit)?;
        }
        Ok(())
    }
}

/// Parses a string of decimal characters of any non-zero length.
///
/// Use [`crate::validate`] when the length must match a game.
impl FromStr for Code {
    type Err = GuessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        crate::validation::validate(trimmed, trimmed.chars().count())
    }
}

/// Feedback for one guess.
///
/// `position` counts exact-index matches; `count` adds value matches at other
/// indices, each digit consumed at most once. `position <= count` always.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    count: usize,
    position: usize,
}

impl Score {
    /// Creates a score.
    pub fn new(count: usize, position: usize) -> Self {
        debug_assert!(position <= count, "position cannot exceed count");
        Self { count, position }
    }

    /// Digits matched anywhere in the secret.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Digits matched at the exact index.
    pub fn position(&self) -> usize {
        self.position
    }

    /// True when every one of `code_length` positions matched.
    pub fn is_exact(&self, code_length: usize) -> bool {
        self.position == code_length
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "count={} position={}", self.count, self.position)
    }
}

/// One accepted, scored guess. `turn` is 1-indexed and equals its history index + 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct HistoryEntry {
    /// Turn number.
    turn: u32,
    /// The guessed code.
    guess: Code,
    /// Feedback for the guess.
    score: Score,
}
