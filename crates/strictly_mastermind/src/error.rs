//! Errors returned when a guess is rejected.

/// Why a guess was not scored.
///
/// Every variant leaves the session untouched: no turn is consumed and
/// history is not appended.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum GuessError {
    /// Input was empty or whitespace only.
    #[display("Guess is empty")]
    EmptyInput,

    /// Input contained a character other than '0'-'9'.
    #[display("Only digits (0-9) are allowed, found {character:?} at index {index}")]
    NonDigitCharacter {
        /// The offending character.
        character: char,
        /// Character index within the trimmed input.
        index: usize,
    },

    /// Input had the wrong number of digits.
    #[display("Guess must have exactly {expected} digits, got {actual}")]
    WrongLength {
        /// Configured code length.
        expected: usize,
        /// Length of the submitted guess.
        actual: usize,
    },

    /// A numeric digit value fell outside 0-9.
    #[display("Digit {digit} at index {index} is outside 0-9")]
    DigitOutOfRange {
        /// The offending value.
        digit: u8,
        /// Index within the guess.
        index: usize,
    },

    /// The game is over; start a new session to keep playing.
    #[display("Game is already over")]
    SessionTerminated,

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {_0}")]
    InvariantViolation(String),
}

impl GuessError {
    /// Machine-readable kind, e.g. `wrong_length`.
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    /// True for the input validation failures.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GuessError::EmptyInput
                | GuessError::NonDigitCharacter { .. }
                | GuessError::WrongLength { .. }
                | GuessError::DigitOutOfRange { .. }
        )
    }
}

impl std::error::Error for GuessError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(GuessError::EmptyInput.kind(), "empty_input");
        assert_eq!(
            GuessError::WrongLength { expected: 4, actual: 3 }.kind(),
            "wrong_length"
        );
        assert_eq!(GuessError::SessionTerminated.kind(), "session_terminated");
    }

    #[test]
    fn test_messages_carry_detail() {
        let err = GuessError::NonDigitCharacter { character: 'x', index: 2 };
        assert_eq!(
            err.to_string(),
            "Only digits (0-9) are allowed, found 'x' at index 2"
        );
        assert!(err.is_validation());
        assert!(!GuessError::SessionTerminated.is_validation());
    }
}
