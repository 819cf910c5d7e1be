//! Errors raised by game operations.

use super::{Mode, Status};

/// Error that can occur when starting a game or applying a guess.
///
/// Every operation validates before it mutates, so receiving one of these
/// means the session is exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GameError {
    /// The requested mode is neither singleplayer nor multiplayer.
    #[display("Unknown game mode {:?}", _0)]
    InvalidMode(#[error(not(source))] String),

    /// A multiplayer game was started without a phrase.
    #[display("A {} game needs a phrase to guess", Mode::Multiplayer)]
    MissingPhrase,

    /// A guess was made after the game ended.
    #[display("Game is already over ({})", _0)]
    InvalidState(#[error(not(source))] Status),

    /// The guess argument is malformed.
    #[display("Invalid guess: {}", _0)]
    InvalidInput(#[error(not(source))] String),

    /// The phrase provider has nothing to choose from.
    #[display("Dictionary contains no phrases")]
    EmptyDictionary,
}
