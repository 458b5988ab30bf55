//! Interactive terminal game.
//!
//! Reads one line at a time. A line is either a command or a guess.

use anyhow::{Context, Result};
use rand::RngCore;
use std::io::{BufRead, Write};
use std::str::FromStr;
use strictly_mastermind::{GuessReport, Outcome, Reveal, Session, SessionSnapshot};
use tracing::{debug, info, instrument};

/// Commands understood besides guesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PlayCommand {
    /// Start a new game with a fresh secret.
    #[strum(serialize = "reset", serialize = "restart")]
    Reset,
    /// Show the secret.
    Reveal,
    /// Print the guess history.
    History,
    /// Print the command list.
    #[strum(serialize = "help", serialize = "?")]
    Help,
    /// Leave the game.
    #[strum(serialize = "quit", serialize = "exit", serialize = "q")]
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

/// A terminal game bound to an output stream.
pub struct TerminalGame<'a, W> {
    session: Session,
    reveal: bool,
    rng: &'a mut dyn RngCore,
    out: W,
}

impl<'a, W: Write> TerminalGame<'a, W> {
    /// Creates a terminal game around `session`.
    ///
    /// With `reveal` set the secret is printed at the start of every game.
    /// `rng` supplies secrets for resets.
    pub fn new(session: Session, reveal: bool, rng: &'a mut dyn RngCore, out: W) -> Self {
        Self {
            session,
            reveal,
            rng,
            out,
        }
    }

    /// The current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Runs until `quit` or end of input; returns the final session.
    #[instrument(skip_all)]
    pub fn run<R: BufRead>(mut self, input: R) -> Result<Session> {
        self.print_intro()?;

        for line in input.lines() {
            let line = line.context("Failed to read input")?;
            if let Flow::Quit = self.handle_line(&line)? {
                break;
            }
            self.prompt()?;
        }

        writeln!(self.out, "Goodbye!")?;
        self.out.flush()?;
        info!(turns = self.session.turn_count(), "Terminal game ended");
        Ok(self.session)
    }

    fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        match PlayCommand::from_str(line) {
            Ok(command) => self.handle_command(command),
            Err(_) => {
                self.handle_guess(line)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn handle_command(&mut self, command: PlayCommand) -> Result<Flow> {
        debug!(%command, "Command");
        match command {
            PlayCommand::Reset => {
                self.session = self.session.clone().reset_with_rng(&mut *self.rng);
                writeln!(self.out, "New game started.")?;
                self.print_intro()?;
            }
            PlayCommand::Reveal => {
                let snapshot = self.session.snapshot(Reveal::Secret);
                if let Some(secret) = snapshot.secret() {
                    writeln!(self.out, "Secret: {}", secret.spaced())?;
                }
            }
            PlayCommand::History => {
                let snapshot = self.session.snapshot(Reveal::Hidden);
                self.print_history(&snapshot)?;
            }
            PlayCommand::Help => self.print_help()?,
            PlayCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn handle_guess(&mut self, line: &str) -> Result<()> {
        match self.session.submit_guess(line) {
            Ok(report) => self.print_report(&report),
            Err(e) => {
                writeln!(self.out, "Error: {}", e)?;
                if self.session.is_game_over() {
                    writeln!(self.out, "Type 'reset' to play again or 'quit' to exit.")?;
                }
                Ok(())
            }
        }
    }

    fn print_report(&mut self, report: &GuessReport) -> Result<()> {
        let snapshot = report.snapshot();
        let guess = snapshot
            .last_guess()
            .as_ref()
            .map(|g| g.spaced())
            .unwrap_or_default();
        writeln!(
            self.out,
            "Turn {}/{}: {} -> count {}, position {}",
            report.turn(),
            snapshot.max_turns(),
            guess,
            report.score().count(),
            report.score().position()
        )?;

        match snapshot.outcome() {
            None => {}
            Some(outcome) => {
                match outcome {
                    Outcome::Won => writeln!(
                        self.out,
                        "Congratulations! You guessed the code in {} turns!",
                        snapshot.turn_count()
                    )?,
                    Outcome::Exhausted => writeln!(
                        self.out,
                        "Game over! Maximum {} turns reached.",
                        snapshot.max_turns()
                    )?,
                }
                let revealed = self.session.snapshot(Reveal::Secret);
                if let Some(secret) = revealed.secret() {
                    writeln!(self.out, "The secret code was: {}", secret.spaced())?;
                }
                if let Some(summary) = snapshot.summary() {
                    writeln!(self.out, "{}", summary)?;
                }
                writeln!(self.out, "Type 'reset' to play again or 'quit' to exit.")?;
            }
        }
        Ok(())
    }

    fn print_history(&mut self, snapshot: &SessionSnapshot) -> Result<()> {
        if snapshot.history().is_empty() {
            writeln!(self.out, "No guesses yet.")?;
            return Ok(());
        }
        writeln!(self.out, "{:>4}  {:<12} {:>5}  {:>8}", "Turn", "Guess", "Count", "Position")?;
        for entry in snapshot.history() {
            writeln!(
                self.out,
                "{:>4}  {:<12} {:>5}  {:>8}",
                entry.turn(),
                entry.guess().spaced(),
                entry.score().count(),
                entry.score().position()
            )?;
        }
        Ok(())
    }

    fn print_intro(&mut self) -> Result<()> {
        let config = *self.session.config();
        writeln!(
            self.out,
            "Guess the {}-digit secret code (digits 0-9, repeats allowed). You have {} turns.",
            config.code_length(),
            config.max_turns()
        )?;
        writeln!(
            self.out,
            "Count: correct digits in any position. Position: correct digits in the correct position."
        )?;
        writeln!(self.out, "Type 'help' for commands.")?;
        if self.reveal {
            if let Some(secret) = self.session.snapshot(Reveal::Secret).secret() {
                writeln!(self.out, "Secret: {}", secret.spaced())?;
            }
        }
        self.prompt()
    }

    fn print_help(&mut self) -> Result<()> {
        writeln!(self.out, "Enter a guess like 0123, or one of:")?;
        writeln!(self.out, "  reset    start a new game")?;
        writeln!(self.out, "  reveal   show the secret code")?;
        writeln!(self.out, "  history  show previous guesses")?;
        writeln!(self.out, "  quit     leave the game")?;
        Ok(())
    }

    fn prompt(&mut self) -> Result<()> {
        write!(self.out, "> ")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Plays `session` on the given streams; returns the final session.
pub fn run_terminal<R: BufRead, W: Write>(
    session: Session,
    reveal: bool,
    rng: &mut dyn RngCore,
    input: R,
    output: W,
) -> Result<Session> {
    TerminalGame::new(session, reveal, rng, output).run(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parsing() {
        assert_eq!(PlayCommand::from_str("quit"), Ok(PlayCommand::Quit));
        assert_eq!(PlayCommand::from_str("Q"), Ok(PlayCommand::Quit));
        assert_eq!(PlayCommand::from_str("RESET"), Ok(PlayCommand::Reset));
        assert_eq!(PlayCommand::from_str("?"), Ok(PlayCommand::Help));
        assert!(PlayCommand::from_str("1234").is_err());
    }
}
