//! Server-side custody of game sessions.

use impiccato::GameSession;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, instrument};

/// Opaque identifier chosen by the transport for one player's session.
pub type SessionId = String;

/// A stored game plus the last time anyone touched it.
#[derive(Debug)]
struct Entry {
    game: GameSession,
    last_access: f64,
    /// Set once the slot has left the map. A retired slot is never mutated.
    retired: bool,
}

type Slot = Arc<Mutex<Entry>>;

/// Maps session ids to games.
///
/// The map lock is only held to find, insert or remove a slot. Each slot has
/// its own mutex, held for the whole read-modify-write of one operation, so
/// concurrent requests for the same player are serialized while different
/// players never wait on each other.
///
/// Lock order is always map then slot. A slot is retired while both locks
/// are held, before it leaves the map, so an operation that finds its slot
/// retired knows the session was replaced or dropped and looks again.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, Slot>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl SessionStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session store");
        Self::default()
    }

    /// Stores `game` under `id`, replacing whatever was there.
    #[instrument(skip(self, game))]
    pub fn insert(&self, id: &str, game: GameSession, now: f64) {
        let slot = Arc::new(Mutex::new(Entry {
            game,
            last_access: now,
            retired: false,
        }));
        let mut sessions = lock(&self.sessions);
        let replaced = match sessions.get(id) {
            Some(old) => {
                lock(old).retired = true;
                true
            }
            None => false,
        };
        sessions.insert(id.to_string(), slot);
        debug!(replaced, "Session stored");
    }

    /// Runs `f` on the game stored under `id` while holding that session's lock.
    ///
    /// Returns `None` when there is no such session.
    #[instrument(skip(self, f))]
    pub fn with_session<R>(
        &self,
        id: &str,
        now: f64,
        f: impl FnOnce(&mut GameSession) -> R,
    ) -> Option<R> {
        loop {
            let slot = lock(&self.sessions).get(id).cloned();
            let Some(slot) = slot else {
                debug!("Session not found");
                return None;
            };

            let mut entry = lock(&slot);
            if entry.retired {
                debug!("Session slot retired, looking up again");
                continue;
            }
            entry.last_access = now;
            return Some(f(&mut entry.game));
        }
    }

    /// Returns a copy of the game stored under `id`.
    #[instrument(skip(self))]
    pub fn get(&self, id: &str, now: f64) -> Option<GameSession> {
        self.with_session(id, now, |game| game.clone())
    }

    /// Removes the session stored under `id`, returning its game.
    #[instrument(skip(self))]
    pub fn remove(&self, id: &str) -> Option<GameSession> {
        let mut sessions = lock(&self.sessions);
        let game = {
            let mut entry = lock(sessions.get(id)?);
            entry.retired = true;
            entry.game.clone()
        };
        sessions.remove(id);
        info!("Session removed");
        Some(game)
    }

    /// Drops every session idle for longer than `ttl` seconds.
    ///
    /// Returns how many were dropped.
    #[instrument(skip(self))]
    pub fn purge_expired(&self, now: f64, ttl: f64) -> usize {
        let mut sessions = lock(&self.sessions);
        let before = sessions.len();
        sessions.retain(|_, slot| {
            let mut entry = lock(slot);
            entry.retired = now - entry.last_access > ttl;
            !entry.retired
        });
        let purged = before - sessions.len();
        if purged > 0 {
            info!(purged, remaining = sessions.len(), "Purged expired sessions");
        }
        purged
    }

    /// Returns the number of stored sessions.
    pub fn len(&self) -> usize {
        lock(&self.sessions).len()
    }

    /// Returns true when no session is stored.
    pub fn is_empty(&self) -> bool {
        lock(&self.sessions).is_empty()
    }
}
