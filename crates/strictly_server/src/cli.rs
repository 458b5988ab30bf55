//! Command-line interface for strictly_mastermind.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Mastermind - guess the secret digit code
#[derive(Parser, Debug)]
#[command(name = "strictly_mastermind")]
#[command(about = "Type-safe mastermind game with terminal and HTTP front ends", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (optional; defaults apply when missing)
    #[arg(short, long, global = true, default_value = "mastermind.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Digits per code
        #[arg(long)]
        code_length: Option<usize>,

        /// Turn budget
        #[arg(long)]
        max_turns: Option<u32>,

        /// Seed for the secret generator (reproducible games)
        #[arg(long)]
        seed: Option<u64>,

        /// Show the secret code at the start of each game
        #[arg(long)]
        reveal: bool,
    },

    /// Run the HTTP game server
    Http {
        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },

    /// Score a guess against a secret and exit
    Score {
        /// Secret code, e.g. 0012
        secret: String,

        /// Guess, e.g. 1200
        guess: String,
    },
}
