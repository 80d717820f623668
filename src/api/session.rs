//! Persisted login session with an explicit lifecycle.
//!
//! The session is created by login, read on startup, and cleared by logout or
//! any 401 response. The HTTP client receives the token by injection and
//! never reads ambient state.

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to access session file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),
}

/// An authenticated session against the MIS API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token returned by `POST /auth/login`
    pub token: String,
    pub username: String,
    pub issued_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
            issued_at: Utc::now(),
        }
    }
}

/// On-disk store for the current session
pub struct SessionStore {
    session_file: PathBuf,
    current: Option<Session>,
}

impl SessionStore {
    /// Open the store, loading any persisted session.
    ///
    /// An unreadable or corrupt session file is treated as "logged out" and
    /// removed, since the server will reject a bad token anyway.
    pub fn open(config: &Config) -> anyhow::Result<Self> {
        let state_path = config.state_path();
        fs::create_dir_all(&state_path).context("Failed to create state directory")?;

        let session_file = state_path.join("session.json");

        let current = if session_file.exists() {
            let contents =
                fs::read_to_string(&session_file).context("Failed to read session file")?;
            match serde_json::from_str::<Session>(&contents) {
                Ok(session) => Some(session),
                Err(err) => {
                    tracing::warn!(error = %err, "Discarding corrupt session file");
                    fs::remove_file(&session_file).context("Failed to remove session file")?;
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            session_file,
            current,
        })
    }

    /// The current session, if signed in
    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// The current bearer token, if signed in
    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.token.as_str())
    }

    /// Persist a new session (login)
    pub fn store(&mut self, session: Session) -> Result<(), SessionError> {
        let contents = serde_json::to_string_pretty(&session)?;
        fs::write(&self.session_file, contents)?;
        self.current = Some(session);
        Ok(())
    }

    /// Drop the session (logout or 401), removing the file
    pub fn clear(&mut self) -> Result<(), SessionError> {
        if self.session_file.exists() {
            fs::remove_file(&self.session_file)?;
        }
        self.current = None;
        Ok(())
    }
}
