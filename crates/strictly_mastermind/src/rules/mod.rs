//! Game rules for mastermind.

mod scoring;
mod termination;

pub use scoring::score;
pub use termination::{check_outcome, is_exhausted, is_win};
