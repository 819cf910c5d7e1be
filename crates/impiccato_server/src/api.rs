//! JSON request and response bodies.

use impiccato::{GameSession, Mode, Status};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Request for starting a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartGameRequest {
    /// "singleplayer" or "multiplayer".
    pub mode: String,
    /// Phrase to guess; required for multiplayer, ignored for singleplayer.
    #[serde(default)]
    pub phrase: Option<String>,
}

/// Request for guessing one letter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessLetterRequest {
    /// Exactly one character.
    pub letter: String,
}

/// Request for guessing the whole phrase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessPhraseRequest {
    /// The candidate phrase.
    pub phrase: String,
}

/// What a client is allowed to see of a game.
///
/// The phrase itself is only included once the game is over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameView {
    /// Game mode.
    pub mode: Mode,
    /// Phrase with untried characters masked.
    pub hidden_phrase: String,
    /// Wrong attempts so far.
    pub stage: u8,
    /// Asset path of the condemned illustration.
    pub stage_image: String,
    /// Game status.
    pub status: Status,
    /// Counted guesses.
    pub attempts: u32,
    /// Characters tried so far.
    pub tried_chars: BTreeSet<char>,
    /// Seconds the game took, once over.
    pub duration: Option<f64>,
    /// The secret phrase, once over.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phrase: Option<String>,
}

impl From<&GameSession> for GameView {
    fn from(game: &GameSession) -> Self {
        Self {
            mode: game.mode(),
            hidden_phrase: game.hidden_phrase(),
            stage: game.stage(),
            stage_image: game.condemned_image_path(),
            status: game.status(),
            attempts: game.attempts(),
            tried_chars: game.tried_chars().clone(),
            duration: game.duration(),
            phrase: (!game.is_playing()).then(|| game.phrase().to_string()),
        }
    }
}

/// Response to a letter or phrase guess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuessResponse {
    /// Whether the guess was right.
    pub correct: bool,
    /// The letter had already been tried.
    #[serde(default)]
    pub repeated: bool,
    /// The game after the guess.
    pub game: GameView,
}

/// Response to the is-playing query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayingResponse {
    /// True iff the session holds a game still being played.
    pub playing: bool,
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable reason.
    pub error: String,
}
