//! Strictly Mastermind - Unified CLI
//!
//! Terminal play, an HTTP server, and a one-shot scorer.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;
use strictly_mastermind::{Code, Session, score};
use strictly_server::{AppConfig, SessionManager, run_terminal, serve};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            code_length,
            max_turns,
            seed,
            reveal,
        } => {
            init_tracing("warn");
            let config = load_config(&cli.config)?;
            run_play(config, code_length, max_turns, seed, reveal)
        }
        Command::Http { port, host } => {
            init_tracing("info");
            let config = load_config(&cli.config)?.with_server(host, port);
            run_http_server(config).await
        }
        Command::Score { secret, guess } => run_score(&secret, &guess),
    }
}

/// Logs go to stderr so they never interleave with the game on stdout.
fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: &Path) -> Result<AppConfig> {
    AppConfig::load(path).with_context(|| format!("Failed to load config {}", path.display()))
}

/// Run the interactive terminal game
#[instrument(skip(config))]
fn run_play(
    config: AppConfig,
    code_length: Option<usize>,
    max_turns: Option<u32>,
    seed: Option<u64>,
    reveal: bool,
) -> Result<()> {
    let game = config.game().with_overrides(code_length, max_turns)?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(
        code_length = game.code_length(),
        max_turns = game.max_turns(),
        "Starting terminal game"
    );

    let session = Session::with_rng(game, &mut rng);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let finished = run_terminal(session, reveal, &mut rng, stdin.lock(), stdout.lock())?;
    debug!(turns = finished.turn_count(), "Play finished");
    Ok(())
}

/// Run the HTTP game server
#[instrument(skip(config))]
async fn run_http_server(config: AppConfig) -> Result<()> {
    info!(
        host = %config.server().host(),
        port = config.server().port(),
        "Starting Strictly Mastermind HTTP server"
    );

    let sessions = SessionManager::new(*config.game());
    serve(config.server(), sessions).await
}

/// Score one guess and print `count=<c> position=<p>`
fn run_score(secret: &str, guess: &str) -> Result<()> {
    let secret: Code = secret.parse().context("Invalid secret")?;
    let guess: Code = guess.parse().context("Invalid guess")?;
    if secret.len() != guess.len() {
        bail!(
            "Secret has {} digits but guess has {}",
            secret.len(),
            guess.len()
        );
    }
    println!("{}", score(&secret, &guess));
    Ok(())
}
