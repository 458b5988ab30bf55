//! Feedback scoring for a guess against the secret.

use crate::types::{Code, Digit, Score};
use tracing::{instrument, trace};

/// Scores `guess` against `secret`.
///
/// Two passes over private copies of both codes:
///
/// 1. Exact pass: every index where the digits agree is consumed on both
///    sides and counts toward both `position` and `count`.
/// 2. Value pass: each remaining secret digit, in index order, consumes the
///    first remaining guess digit of equal value and counts toward `count`.
///
/// Consumption means a repeated guess digit is never credited more often
/// than it occurs in the secret. The result is deterministic and satisfies
/// `position <= count <= len`.
///
/// Codes are expected to have equal length; extra digits on either side
/// can only match by value.
#[instrument(level = "trace", skip(secret))]
pub fn score(secret: &Code, guess: &Code) -> Score {
    debug_assert_eq!(secret.len(), guess.len(), "codes must have equal length");

    let mut secret_left: Vec<Option<Digit>> = secret.digits().iter().copied().map(Some).collect();
    let mut guess_left: Vec<Option<Digit>> = guess.digits().iter().copied().map(Some).collect();

    let mut position = 0;
    for (s, g) in secret_left.iter_mut().zip(guess_left.iter_mut()) {
        if s.is_some() && s == g {
            *s = None;
            *g = None;
            position += 1;
        }
    }

    let mut count = position;
    for s in secret_left.iter_mut() {
        let Some(digit) = *s else {
            continue;
        };
        if let Some(g) = guess_left.iter_mut().find(|g| **g == Some(digit)) {
            *g = None;
            *s = None;
            count += 1;
        }
    }

    trace!(count, position, "Scored guess");
    Score::new(count, position)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> Code {
        s.parse().unwrap()
    }

    fn check(secret: &str, guess: &str, count: usize, position: usize) {
        assert_eq!(
            score(&code(secret), &code(guess)),
            Score::new(count, position),
            "secret={secret} guess={guess}"
        );
    }

    #[test]
    fn test_exact_match_scores_full() {
        check("1234", "1234", 4, 4);
        check("0000", "0000", 4, 4);
        check("90210", "90210", 5, 5);
    }

    #[test]
    fn test_no_double_counting() {
        check("1122", "1111", 2, 2);
        check("1111", "1122", 2, 2);
    }

    #[test]
    fn test_reversed_digits() {
        check("1234", "4321", 4, 0);
    }

    #[test]
    fn test_partial_match() {
        check("5927", "5328", 2, 2);
    }

    #[test]
    fn test_no_match() {
        check("1234", "5678", 0, 0);
    }

    #[test]
    fn test_exact_match_consumed_before_value_match() {
        // The 1 at index 3 matches exactly; the guess's leading 1 has nothing left.
        check("2341", "1561", 1, 1);
        // Secret has one 7; the exact hit takes it.
        check("7000", "7777", 1, 1);
    }

    #[test]
    fn test_repeated_secret_digits() {
        check("3332", "2333", 4, 2);
        check("1212", "2121", 4, 0);
        check("1123", "3111", 3, 1);
    }

    #[test]
    fn test_inputs_not_mutated() {
        let secret = code("1122");
        let guess = code("2211");
        let _ = score(&secret, &guess);
        assert_eq!(secret, code("1122"));
        assert_eq!(guess, code("2211"));
    }

    #[test]
    fn test_position_never_exceeds_count() {
        let samples = ["0000", "0123", "1111", "9876", "1001", "5555", "0909"];
        for secret in samples {
            for guess in samples {
                let result = score(&code(secret), &code(guess));
                assert!(result.position() <= result.count());
                assert!(result.count() <= 4);
            }
        }
    }

    #[test]
    fn test_symmetric_count() {
        let samples = ["1123", "3211", "4444", "1234", "2143"];
        for a in samples {
            for b in samples {
                assert_eq!(score(&code(a), &code(b)), score(&code(b), &code(a)));
            }
        }
    }
}
