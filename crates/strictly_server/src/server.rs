//! JSON REST API over axum.

use crate::config::ServerConfig;
use crate::session::{SessionError, SessionId, SessionManager};
use axum::body::Bytes;
use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use serde_json::json;
use strictly_mastermind::{ConfigError, GuessError, GuessReport, Reveal, SessionSnapshot};
use tracing::{debug, error, info, instrument, warn};

/// Optional parameters for a new session; unset fields use the server default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    /// Digits per code.
    #[serde(default)]
    pub code_length: Option<usize>,
    /// Turn budget.
    #[serde(default)]
    pub max_turns: Option<u32>,
}

/// Response for a created session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedSession {
    /// Session id for subsequent requests.
    pub id: SessionId,
    /// Initial state.
    pub snapshot: SessionSnapshot,
}

/// A guess, either as a string or as numeric digits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GuessRequest {
    /// `{"guess": "0012"}`
    Text {
        /// Raw guess string.
        guess: String,
    },
    /// `{"digits": [0, 0, 1, 2]}`
    Digits {
        /// Digits, most significant first.
        digits: Vec<u8>,
    },
}

/// Query parameters for reading a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotQuery {
    /// Include the secret in the snapshot.
    #[serde(default)]
    pub reveal: bool,
}

/// Error returned by an API handler.
#[derive(Debug, Display, From)]
pub enum ApiError {
    /// Unknown session id.
    #[display("Session {_0} not found")]
    #[from(ignore)]
    NotFound(SessionId),

    /// Guess rejected by the game.
    #[display("{_0}")]
    Guess(GuessError),

    /// Invalid session parameters.
    #[display("{}", _0.message)]
    Config(ConfigError),

    /// Malformed request body.
    #[display("{_0}")]
    #[from(ignore)]
    BadRequest(String),
}

impl std::error::Error for ApiError {}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound(id) => ApiError::NotFound(id),
            SessionError::Guess(e) => ApiError::Guess(e),
        }
    }
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Guess(GuessError::SessionTerminated) => StatusCode::CONFLICT,
            ApiError::Guess(GuessError::InvariantViolation(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Guess(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Config(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "not_found",
            ApiError::Guess(e) => e.kind(),
            ApiError::Config(_) => "invalid_config",
            ApiError::BadRequest(_) => "bad_request",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            debug!(error = %self, %status, "Request rejected");
        }
        let body = json!({ "error": self.to_string(), "kind": self.kind() });
        (status, Json(body)).into_response()
    }
}

/// Builds the API router over a shared session manager.
#[instrument(skip(sessions))]
pub fn router(sessions: SessionManager) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/sessions", post(create_session))
        .route("/sessions/{id}", get(get_session).delete(delete_session))
        .route("/sessions/{id}/guesses", post(submit_guess))
        .route("/sessions/{id}/reset", post(reset_session))
        .layer(middleware::from_fn(log_requests))
        .with_state(sessions)
}

/// Binds the listener and serves the API until the process exits.
#[instrument(skip(sessions))]
pub async fn serve(config: &ServerConfig, sessions: SessionManager) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host(), config.port());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Server ready at http://{}/", addr);

    axum::serve(listener, router(sessions)).await?;
    warn!("Server exited");
    Ok(())
}

async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let response = next.run(req).await;
    info!(%method, %uri, status = %response.status(), "Handled request");
    response
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

#[instrument(skip(sessions, body))]
async fn create_session(
    State(sessions): State<SessionManager>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreatedSession>), ApiError> {
    let request: CreateSessionRequest = if body.iter().all(u8::is_ascii_whitespace) {
        CreateSessionRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?
    };

    let config = sessions
        .default_config()
        .with_overrides(request.code_length, request.max_turns)?;
    let (id, snapshot) = sessions.create_session(config);
    Ok((StatusCode::CREATED, Json(CreatedSession { id, snapshot })))
}

#[instrument(skip(sessions))]
async fn get_session(
    State(sessions): State<SessionManager>,
    Path(id): Path<SessionId>,
    Query(query): Query<SnapshotQuery>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let snapshot = sessions.snapshot(&id, Reveal::from(query.reveal))?;
    Ok(Json(snapshot))
}

#[instrument(skip(sessions, body))]
async fn submit_guess(
    State(sessions): State<SessionManager>,
    Path(id): Path<SessionId>,
    body: Bytes,
) -> Result<Json<GuessReport>, ApiError> {
    let request: GuessRequest = serde_json::from_slice(&body).map_err(|e| {
        ApiError::BadRequest(format!(
            "Expected {{\"guess\": \"<digits>\"}} or {{\"digits\": [0-9, ...]}}: {}",
            e
        ))
    })?;
    debug!(?request, "Guess request");

    let report = match request {
        GuessRequest::Text { guess } => sessions.submit_guess(&id, &guess)?,
        GuessRequest::Digits { digits } => sessions.submit_digits(&id, &digits)?,
    };
    Ok(Json(report))
}

#[instrument(skip(sessions))]
async fn reset_session(
    State(sessions): State<SessionManager>,
    Path(id): Path<SessionId>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    Ok(Json(sessions.reset(&id)?))
}

#[instrument(skip(sessions))]
async fn delete_session(
    State(sessions): State<SessionManager>,
    Path(id): Path<SessionId>,
) -> Result<StatusCode, ApiError> {
    sessions.remove(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
