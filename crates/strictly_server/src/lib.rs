//! Strictly Mastermind server - front ends for the mastermind game.
//!
//! # Architecture
//!
//! - **Config**: TOML file plus `MASTERMIND_*` environment overrides
//! - **Session**: one owned game per session id behind a shared manager
//! - **Server**: JSON REST API over axum
//! - **Play**: interactive terminal game on any reader/writer pair

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod play;
mod server;
mod session;

// Crate-level exports - Configuration
pub use config::{AppConfig, ServerConfig};

// Crate-level exports - Terminal play
pub use play::{PlayCommand, TerminalGame, run_terminal};

// Crate-level exports - HTTP server
pub use server::{
    ApiError, CreateSessionRequest, CreatedSession, GuessRequest, SnapshotQuery, router, serve,
};

// Crate-level exports - Session management
pub use session::{SessionError, SessionId, SessionManager};
