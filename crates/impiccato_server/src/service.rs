//! Game operations keyed by session id.

use crate::store::{SessionId, SessionStore};
use derive_getters::Getters;
use derive_more::{Display, Error};
use impiccato::{
    Clock, Dictionary, GameError, GameSession, GuessOutcome, Mode, PhraseProvider, Status,
    SystemClock,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Error returned by [`HangmanService`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ServiceError {
    /// The game rejected the operation.
    #[display("{}", _0)]
    Game(#[error(not(source))] GameError),

    /// No game is stored under the session id.
    #[display("No game in session {:?}", _0)]
    SessionNotFound(#[error(not(source))] SessionId),
}

impl From<GameError> for ServiceError {
    fn from(err: GameError) -> Self {
        Self::Game(err)
    }
}

/// Entry point for the transport layer.
///
/// Owns the session store and the injected clock and phrase provider, and
/// exposes each game operation against a session id.
#[derive(Clone, Getters, derive_new::new)]
pub struct HangmanService {
    /// Where the games live.
    store: SessionStore,
    /// Time source for start times, durations and expiry.
    clock: Arc<dyn Clock>,
    /// Phrase source for singleplayer games.
    phrases: Arc<dyn PhraseProvider>,
}

impl HangmanService {
    /// Creates a service with the system clock and the built-in dictionary.
    #[instrument]
    pub fn with_defaults() -> Self {
        Self::new(
            SessionStore::new(),
            Arc::new(SystemClock),
            Arc::new(Dictionary::builtin()),
        )
    }

    /// Starts a new game, replacing any game already in the session.
    #[instrument(skip(self, phrase))]
    pub fn initialize(
        &self,
        id: &str,
        mode: &str,
        phrase: Option<&str>,
    ) -> Result<(), ServiceError> {
        let mode = Mode::parse(mode)?;
        let game =
            GameSession::initialize(mode, phrase, self.phrases.as_ref(), self.clock.as_ref())?;
        self.store.insert(id, game, self.clock.now());
        info!(%mode, "New game stored");
        Ok(())
    }

    /// Guesses one character in the session's game.
    #[instrument(skip(self))]
    pub fn guess_letter(&self, id: &str, letter: &str) -> Result<GuessOutcome, ServiceError> {
        self.guess_letter_with_game(id, letter).map(|(outcome, _)| outcome)
    }

    /// Guesses one character and returns the game as it stands afterwards.
    ///
    /// Both happen under the same session lock.
    #[instrument(skip(self))]
    pub fn guess_letter_with_game(
        &self,
        id: &str,
        letter: &str,
    ) -> Result<(GuessOutcome, GameSession), ServiceError> {
        self.guess(id, |game, clock| game.guess_letter(letter, clock))
    }

    /// Guesses the whole phrase in the session's game.
    #[instrument(skip(self, phrase))]
    pub fn guess_phrase(&self, id: &str, phrase: &str) -> Result<GuessOutcome, ServiceError> {
        self.guess_phrase_with_game(id, phrase).map(|(outcome, _)| outcome)
    }

    /// Guesses the whole phrase and returns the game as it stands afterwards.
    #[instrument(skip(self, phrase))]
    pub fn guess_phrase_with_game(
        &self,
        id: &str,
        phrase: &str,
    ) -> Result<(GuessOutcome, GameSession), ServiceError> {
        self.guess(id, |game, clock| game.guess_phrase(phrase, clock))
    }

    /// Renders the session's hidden phrase.
    #[instrument(skip(self))]
    pub fn hidden_phrase(&self, id: &str) -> Result<String, ServiceError> {
        self.read(id, GameSession::hidden_phrase)
    }

    /// Returns the condemned illustration index for the session's game.
    #[instrument(skip(self))]
    pub fn stage_image_index(&self, id: &str) -> Result<u8, ServiceError> {
        self.read(id, GameSession::stage_image_index)
    }

    /// Returns true iff the session holds a game that is still being played.
    #[instrument(skip(self))]
    pub fn is_playing(&self, id: &str) -> bool {
        let playing = self
            .store
            .with_session(id, self.clock.now(), |game| game.is_playing())
            .unwrap_or(false);
        debug!(playing, "Checked whether session is playing");
        playing
    }

    /// Returns the status of the session's game.
    #[instrument(skip(self))]
    pub fn status(&self, id: &str) -> Result<Status, ServiceError> {
        self.read(id, GameSession::status)
    }

    /// Returns the number of counted guesses in the session's game.
    #[instrument(skip(self))]
    pub fn attempts(&self, id: &str) -> Result<u32, ServiceError> {
        self.read(id, GameSession::attempts)
    }

    /// Returns how long the session's game took, once it is over.
    #[instrument(skip(self))]
    pub fn duration(&self, id: &str) -> Result<Option<f64>, ServiceError> {
        self.read(id, GameSession::duration)
    }

    /// Returns a copy of the session's game.
    #[instrument(skip(self))]
    pub fn snapshot(&self, id: &str) -> Result<GameSession, ServiceError> {
        self.store
            .get(id, self.clock.now())
            .ok_or_else(|| self.not_found(id))
    }

    /// Throws away the session's game.
    #[instrument(skip(self))]
    pub fn abandon(&self, id: &str) -> Result<(), ServiceError> {
        self.store
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| self.not_found(id))
    }

    /// Drops sessions idle for longer than `ttl_secs`.
    #[instrument(skip(self))]
    pub fn purge_expired(&self, ttl_secs: f64) -> usize {
        self.store.purge_expired(self.clock.now(), ttl_secs)
    }

    fn guess(
        &self,
        id: &str,
        f: impl FnOnce(&mut GameSession, &dyn Clock) -> Result<GuessOutcome, GameError>,
    ) -> Result<(GuessOutcome, GameSession), ServiceError> {
        let clock = self.clock.as_ref();
        self.store
            .with_session(id, clock.now(), |game| {
                f(game, clock).map(|outcome| (outcome, game.clone()))
            })
            .ok_or_else(|| self.not_found(id))?
            .map_err(ServiceError::from)
    }

    fn read<R>(&self, id: &str, f: impl FnOnce(&GameSession) -> R) -> Result<R, ServiceError> {
        self.store
            .with_session(id, self.clock.now(), |game| f(&*game))
            .ok_or_else(|| self.not_found(id))
    }

    fn not_found(&self, id: &str) -> ServiceError {
        warn!(session_id = id, "No game in session");
        ServiceError::SessionNotFound(id.to_string())
    }
}
