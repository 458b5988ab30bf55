//! Scoring properties.

use strictly_mastermind::{Code, Score, score};

fn code(s: &str) -> Code {
    s.parse().expect("valid code")
}

#[test]
fn test_exact_match_scores_full_length() {
    for s in ["0000", "1234", "9090", "5555"] {
        assert_eq!(score(&code(s), &code(s)), Score::new(4, 4));
    }
}

#[test]
fn test_no_double_counting() {
    let result = score(&code("1122"), &code("1111"));
    assert_eq!(result.count(), 2);
    assert_eq!(result.position(), 2);
}

#[test]
fn test_value_pass_ordering() {
    let result = score(&code("1234"), &code("4321"));
    assert_eq!(result.count(), 4);
    assert_eq!(result.position(), 0);
}

#[test]
fn test_partial_match() {
    let result = score(&code("5927"), &code("5328"));
    assert_eq!(result.position(), 2);
    assert_eq!(result.count(), 2);
}

#[test]
fn test_position_never_exceeds_count_exhaustive_two_digit() {
    for a in 0..100u32 {
        for b in 0..100u32 {
            let secret = code(&format!("{a:02}"));
            let guess = code(&format!("{b:02}"));
            let result = score(&secret, &guess);
            assert!(result.position() <= result.count(), "{secret} vs {guess}");
            assert!(result.count() <= 2, "{secret} vs {guess}");
        }
    }
}

#[test]
fn test_deterministic() {
    let secret = code("3141");
    let guess = code("1413");
    assert_eq!(score(&secret, &guess), score(&secret, &guess));
}
