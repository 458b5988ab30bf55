//! Sequential turns invariant: history is ordered and gap-free.

use super::Invariant;
use crate::typestate::GameRecord;

/// Invariant: entry `i` of the history carries turn number `i + 1`.
pub struct SequentialTurnsInvariant;

impl<S: GameRecord> Invariant<S> for SequentialTurnsInvariant {
    fn holds(state: &S) -> bool {
        state
            .history()
            .iter()
            .zip(1u32..)
            .all(|(entry, expected)| *entry.turn() == expected)
    }

    fn description() -> &'static str {
        "History turn numbers run 1, 2, 3, ... in order"
    }
}
