//! Outcome and summary of a finished game.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// A guess matched every position.
    #[display("Won")]
    Won,
    /// The turn budget ran out without a match.
    #[display("Exhausted")]
    Exhausted,
}

impl Outcome {
    /// Returns true if the player found the code.
    pub fn is_win(&self) -> bool {
        matches!(self, Outcome::Won)
    }
}

/// End-of-game statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Getters)]
pub struct GameSummary {
    /// Why the game ended.
    outcome: Outcome,
    /// Guesses accepted.
    turns_used: u32,
    /// Budget the game was played with.
    max_turns: u32,
    /// Share of the budget used, in percent.
    budget_used_percent: f64,
    /// Share of the budget left unused, in percent (`100 - budget_used_percent`).
    efficiency_percent: f64,
    /// Whether the code was found.
    success: bool,
}

impl GameSummary {
    /// Builds the summary for a game that ended with `outcome` after `turns_used` guesses.
    pub fn new(outcome: Outcome, turns_used: u32, max_turns: u32) -> Self {
        let budget_used_percent = if max_turns == 0 {
            0.0
        } else {
            f64::from(turns_used) / f64::from(max_turns) * 100.0
        };
        Self {
            outcome,
            turns_used,
            max_turns,
            budget_used_percent,
            efficiency_percent: 100.0 - budget_used_percent,
            success: outcome.is_win(),
        }
    }
}

impl std::fmt::Display for GameSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} in {}/{} turns (efficiency {:.0}%)",
            self.outcome, self.turns_used, self.max_turns, self.efficiency_percent
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_efficiency() {
        let summary = GameSummary::new(Outcome::Won, 5, 20);
        assert_eq!(*summary.budget_used_percent(), 25.0);
        assert_eq!(*summary.efficiency_percent(), 75.0);
        assert!(*summary.success());
        assert_eq!(summary.to_string(), "Won in 5/20 turns (efficiency 75%)");
    }

    #[test]
    fn test_exhausted_summary_is_not_success() {
        let summary = GameSummary::new(Outcome::Exhausted, 20, 20);
        assert!(!*summary.success());
        assert_eq!(*summary.budget_used_percent(), 100.0);
        assert_eq!(*summary.efficiency_percent(), 0.0);
    }
}
