//! Session management for the HTTP front end.
//!
//! Every player gets an independently owned [`Session`]; the manager only
//! maps ids to sessions and serializes access to the map.

use derive_more::{Display, From};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use strictly_mastermind::{GameConfig, GuessError, GuessReport, Reveal, Session, SessionSnapshot};
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a game session.
pub type SessionId = String;

/// Error from a session manager operation.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum SessionError {
    /// No session with the given id.
    #[display("Session {_0} not found")]
    #[from(ignore)]
    NotFound(SessionId),

    /// The guess was rejected.
    #[display("{_0}")]
    Guess(GuessError),
}

impl std::error::Error for SessionError {}

/// Manages all game sessions.
#[derive(Debug, Clone)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<SessionId, Session>>>,
    default_config: GameConfig,
}

impl SessionManager {
    /// Creates a new session manager.
    #[instrument]
    pub fn new(default_config: GameConfig) -> Self {
        info!("Creating session manager");
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            default_config,
        }
    }

    /// Configuration used when a caller does not supply one.
    pub fn default_config(&self) -> &GameConfig {
        &self.default_config
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, Session>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates a new session and returns its id and initial snapshot.
    #[instrument(skip(self))]
    pub fn create_session(&self, config: GameConfig) -> (SessionId, SessionSnapshot) {
        let id = uuid::Uuid::new_v4().to_string();
        let session = Session::new(config);
        let snapshot = session.snapshot(Reveal::Hidden);

        self.lock().insert(id.clone(), session);
        info!(session_id = %id, "Created new session");
        (id, snapshot)
    }

    /// Returns a snapshot of the session.
    #[instrument(skip(self))]
    pub fn snapshot(&self, id: &str, reveal: Reveal) -> Result<SessionSnapshot, SessionError> {
        let sessions = self.lock();
        let session = sessions.get(id).ok_or_else(|| not_found(id))?;
        Ok(session.snapshot(reveal))
    }

    /// Submits a raw guess string to the session.
    #[instrument(skip(self))]
    pub fn submit_guess(&self, id: &str, raw: &str) -> Result<GuessReport, SessionError> {
        let mut sessions = self.lock();
        let session = sessions.get_mut(id).ok_or_else(|| not_found(id))?;
        let report = session.submit_guess(raw)?;
        debug!(session_id = id, turn = report.turn(), "Guess accepted");
        Ok(report)
    }

    /// Submits a guess given as numeric digits to the session.
    #[instrument(skip(self))]
    pub fn submit_digits(&self, id: &str, digits: &[u8]) -> Result<GuessReport, SessionError> {
        let mut sessions = self.lock();
        let session = sessions.get_mut(id).ok_or_else(|| not_found(id))?;
        let report = session.submit_digits(digits)?;
        debug!(session_id = id, turn = report.turn(), "Guess accepted");
        Ok(report)
    }

    /// Replaces the session with a fresh one under the same id.
    #[instrument(skip(self))]
    pub fn reset(&self, id: &str) -> Result<SessionSnapshot, SessionError> {
        let mut sessions = self.lock();
        let session = sessions.remove(id).ok_or_else(|| not_found(id))?;
        let fresh = session.reset();
        let snapshot = fresh.snapshot(Reveal::Hidden);
        sessions.insert(id.to_string(), fresh);
        info!(session_id = id, "Session reset");
        Ok(snapshot)
    }

    /// Discards the session.
    #[instrument(skip(self))]
    pub fn remove(&self, id: &str) -> Result<(), SessionError> {
        self.lock()
            .remove(id)
            .map(|_| info!(session_id = id, "Session removed"))
            .ok_or_else(|| not_found(id))
    }

    /// Lists all active session ids.
    #[instrument(skip(self))]
    pub fn list_sessions(&self) -> Vec<SessionId> {
        let ids: Vec<_> = self.lock().keys().cloned().collect();
        debug!(count = ids.len(), "Listed sessions");
        ids
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

fn not_found(id: &str) -> SessionError {
    warn!(session_id = id, "Session not found");
    SessionError::NotFound(id.to_string())
}
