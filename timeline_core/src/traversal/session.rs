//! Sessions - one isolated store and player pairing per game.
//!
//! Nothing is shared between sessions. A session sits behind its own mutex,
//! and every transition runs entirely while that lock is held.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use uuid::Uuid;

use super::{PlayerState, Progress, TimelineEngine, Transition};
use crate::error::{Result, TimelineError};
use crate::event_tree::{Event, EventStore};

/// Unique identifier for sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A store, the player walking it, and the engine that moves the player.
///
/// The editor and the game both work on `store`; there is no second copy.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    store: EventStore,
    player: PlayerState,
    engine: TimelineEngine,
}

impl Session {
    /// Start a session on the store's initial event.
    pub fn new(store: EventStore, engine: TimelineEngine) -> Self {
        let player = engine.new_game(&store);
        Self {
            id: SessionId::new(),
            store,
            player,
            engine,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn engine(&self) -> &TimelineEngine {
        &self.engine
    }

    pub fn current_event(&self) -> Option<&Event> {
        self.engine.current_event(&self.store, &self.player)
    }

    pub fn progress(&self) -> Progress {
        self.engine.progress(&self.store, &self.player)
    }

    /// Take a choice on the current event.
    pub fn choose(&mut self, choice_id: &str) -> Result<Transition> {
        self.engine.apply_choice(&self.store, &mut self.player, choice_id)
    }

    /// Restart play. Authored content is kept.
    pub fn reset(&mut self) {
        self.engine.reset(&self.store, &mut self.player);
    }

    /// Edit the authored content. Play progress is kept; if the current event
    /// is removed the session reports [`Progress::Detached`] until reset.
    pub fn edit<F, R>(&mut self, edit: F) -> R
    where
        F: FnOnce(&mut EventStore) -> R,
    {
        edit(&mut self.store)
    }

    /// Swap in a newly loaded store and restart play on it.
    pub fn reload(&mut self, store: EventStore) {
        self.store = store;
        self.reset();
    }
}

/// Sessions keyed by id.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<SessionId, Arc<Mutex<Session>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session and return its id.
    pub fn create(&self, store: EventStore, engine: TimelineEngine) -> SessionId {
        let session = Session::new(store, engine);
        let id = session.id();
        self.sessions().insert(id, Arc::new(Mutex::new(session)));
        tracing::info!(session = %id, "created session");
        id
    }

    /// Shared handle to a session.
    pub fn get(&self, id: SessionId) -> Result<Arc<Mutex<Session>>> {
        self.sessions()
            .get(&id)
            .cloned()
            .ok_or(TimelineError::SessionNotFound(id))
    }

    /// Run `f` with exclusive access to one session.
    pub fn with_session<F, R>(&self, id: SessionId, f: F) -> Result<R>
    where
        F: FnOnce(&mut Session) -> R,
    {
        let handle = self.get(id)?;
        let mut session = handle
            .lock()
            .map_err(|_| TimelineError::SessionPoisoned(id))?;
        Ok(f(&mut session))
    }

    /// Take a choice in one session.
    pub fn choose(&self, id: SessionId, choice_id: &str) -> Result<Transition> {
        self.with_session(id, |session| session.choose(choice_id))?
    }

    /// Drop a session. Returns whether it existed.
    pub fn remove(&self, id: SessionId) -> bool {
        let removed = self.sessions().remove(&id).is_some();
        if removed {
            tracing::info!(session = %id, "removed session");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions().is_empty()
    }

    // Map operations are single inserts/removes, so a poisoned map is still consistent.
    fn sessions(&self) -> std::sync::MutexGuard<'_, HashMap<SessionId, Arc<Mutex<Session>>>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
