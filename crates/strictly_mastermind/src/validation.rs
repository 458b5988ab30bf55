//! Input validation: raw player input to [`Code`].
//!
//! Rules run in a fixed order and the first failure is reported:
//! empty input, non-digit character, wrong length, digit out of range.

use crate::error::GuessError;
use crate::types::{Code, Digit};
use tracing::{debug, instrument, warn};

/// Validates a raw guess string against a code length.
///
/// Surrounding whitespace is ignored. Leading zeros are kept, so `"0007"`
/// becomes `[0, 0, 0, 7]`.
///
/// # Errors
///
/// Returns the first failing rule as a [`GuessError`].
#[instrument]
pub fn validate(raw: &str, code_length: usize) -> Result<Code, GuessError> {
    let input = raw.trim();

    if input.is_empty() {
        warn!("Empty guess");
        return Err(GuessError::EmptyInput);
    }

    if let Some((index, character)) = input.chars().enumerate().find(|(_, c)| !c.is_ascii_digit())
    {
        warn!(index, ?character, "Non-digit character in guess");
        return Err(GuessError::NonDigitCharacter { character, index });
    }

    // Only ASCII digits remain, so byte length equals character count.
    let actual = input.len();
    if actual != code_length {
        warn!(expected = code_length, actual, "Guess has wrong length");
        return Err(GuessError::WrongLength {
            expected: code_length,
            actual,
        });
    }

    let digits = input
        .bytes()
        .enumerate()
        .map(|(index, b)| to_digit(b - b'0', index))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Guess validated");
    Ok(Code::new(digits))
}

/// Validates a guess already split into numeric digits.
///
/// Used for encodings that deliver integers rather than characters, where
/// a value above 9 is possible. Order: empty, wrong length, digit range.
///
/// # Errors
///
/// Returns the first failing rule as a [`GuessError`].
#[instrument]
pub fn validate_digits(values: &[u8], code_length: usize) -> Result<Code, GuessError> {
    if values.is_empty() {
        warn!("Empty guess");
        return Err(GuessError::EmptyInput);
    }

    if values.len() != code_length {
        warn!(expected = code_length, actual = values.len(), "Guess has wrong length");
        return Err(GuessError::WrongLength {
            expected: code_length,
            actual: values.len(),
        });
    }

    let digits = values
        .iter()
        .enumerate()
        .map(|(index, value)| to_digit(*value, index))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Guess validated");
    Ok(Code::new(digits))
}

fn to_digit(value: u8, index: usize) -> Result<Digit, GuessError> {
    Digit::new(value).ok_or_else(|| {
        warn!(digit = value, index, "Digit out of range");
        GuessError::DigitOutOfRange {
            digit: value,
            index,
        }
    })
}
