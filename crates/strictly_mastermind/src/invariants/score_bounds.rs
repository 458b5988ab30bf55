//! Score bounds invariant.

use super::Invariant;
use crate::typestate::GameRecord;

/// Invariant: every recorded guess has the code length and `position <= count <= length`.
pub struct ScoreBoundsInvariant;

impl<S: GameRecord> Invariant<S> for ScoreBoundsInvariant {
    fn holds(state: &S) -> bool {
        let length = *state.config().code_length();
        state.history().iter().all(|entry| {
            let score = entry.score();
            entry.guess().len() == length
                && score.position() <= score.count()
                && score.count() <= length
        })
    }

    fn description() -> &'static str {
        "Every score satisfies position <= count <= code length"
    }
}
