//! # Skirmish Session Server
//!
//! Headless session layer for combat encounters.
//!
//! The [`SessionManager`] owns the process-wide collection of independent
//! combat sessions. Each session sits behind its own lock, so concurrent
//! ticks and action submissions on the same session serialize while
//! distinct sessions proceed independently. The manager itself never runs
//! combat logic; that lives in `skirmish_core`.
//!
//! Transport and durable storage are caller concerns: this crate exposes
//! create/query/mutate/delete and nothing else.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use skirmish_core::actions::{Action, ActionOutcome};
use skirmish_core::config::BattleConfig;
use skirmish_core::session::{CombatSession, Snapshot};
use skirmish_core::units::Unit;

/// Unique identifier for sessions.
pub type SessionId = Uuid;

/// Result type alias using [`SessionError`].
pub type Result<T> = std::result::Result<T, SessionError>;

/// Hard failures at the session-manager boundary.
///
/// Everything else (rejected placements, ended combat) is a soft outcome
/// carried as data in [`ActionOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The session id is unknown (never created, or already deleted).
    #[error("Session not found: {0}")]
    NotFound(SessionId),
}

/// Process-wide owner of independent combat sessions.
///
/// The session map is guarded by its own lock, independent of the
/// per-session locks. Map guards are never held across a session lock
/// acquisition, so a slow tick on one session cannot block lookups or
/// lifecycle operations on others.
#[derive(Debug)]
pub struct SessionManager {
    /// Configuration applied to every new session.
    config: BattleConfig,
    /// Session map. Values are shared handles so the map guard can be
    /// dropped before the per-session lock is taken.
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<CombatSession>>>>,
}

impl SessionManager {
    /// Create a manager applying `config` to every new session.
    #[must_use]
    pub fn new(config: BattleConfig) -> Self {
        Self {
            config,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Create a new session from two rosters.
    ///
    /// Units are copied into the session. Returns the new id and the
    /// initial snapshot.
    pub async fn create(&self, player_units: &[Unit], enemy_units: &[Unit]) -> (SessionId, Snapshot) {
        let id = Uuid::new_v4();
        let session =
            CombatSession::with_config(id.to_string(), player_units, enemy_units, self.config);
        let snapshot = session.snapshot();

        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(session)));
        tracing::info!(session = %id, units = snapshot.units.len(), "Session created");

        (id, snapshot)
    }

    /// Get the current snapshot of a session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotFound`] for an unknown id.
    pub async fn state(&self, id: SessionId) -> Result<Snapshot> {
        let session = self.session(id).await?;
        let guard = session.lock().await;
        Ok(guard.snapshot())
    }

    /// Submit a player action to a session.
    ///
    /// The outcome is soft (success flag + message + snapshot); only the
    /// id lookup can fail hard.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotFound`] for an unknown id.
    pub async fn submit_action(&self, id: SessionId, action: &Action) -> Result<ActionOutcome> {
        let session = self.session(id).await?;
        let mut guard = session.lock().await;
        Ok(guard.process_action(action))
    }

    /// Advance a session by one tick and return the new snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotFound`] for an unknown id.
    pub async fn tick(&self, id: SessionId) -> Result<Snapshot> {
        let session = self.session(id).await?;
        let mut guard = session.lock().await;
        guard.tick();
        Ok(guard.snapshot())
    }

    /// Delete a session.
    ///
    /// Not idempotent: a second delete on the same id fails.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotFound`] for an unknown id.
    pub async fn delete(&self, id: SessionId) -> Result<()> {
        match self.sessions.write().await.remove(&id) {
            Some(_) => {
                tracing::info!(session = %id, "Session deleted");
                Ok(())
            }
            None => Err(SessionError::NotFound(id)),
        }
    }

    /// Number of live sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Look up a session handle, dropping the map guard before returning.
    async fn session(&self, id: SessionId) -> Result<Arc<Mutex<CombatSession>>> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(SessionError::NotFound(id))
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(BattleConfig::default())
    }
}
