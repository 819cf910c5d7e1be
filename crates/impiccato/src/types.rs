//! Core domain types for hangman.

use super::GameError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of wrong attempts that ends the game.
///
/// Stages run from 0 (nobody on the gallows) to `MAX_STAGE` (fully hanged).
pub const MAX_STAGE: u8 = 6;

/// How the secret phrase was chosen.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    /// The phrase is drawn at random from the dictionary.
    Singleplayer,
    /// The phrase is supplied by the player who starts the game.
    Multiplayer,
}

impl Mode {
    /// Parses a mode name as sent by a client ("singleplayer" or "multiplayer").
    #[instrument]
    pub fn parse(name: &str) -> Result<Self, GameError> {
        name.trim()
            .to_lowercase()
            .parse::<Mode>()
            .map_err(|_| GameError::InvalidMode(name.to_string()))
    }
}

/// Current status of the game.
///
/// A game starts in [`Status::Playing`] and moves to exactly one of the
/// terminal states, never leaving it afterwards.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    /// Guesses are still accepted.
    Playing,
    /// The phrase was fully revealed or guessed outright.
    Won,
    /// The condemned reached the last stage.
    Lost,
}

impl Status {
    /// Returns true for `Won` and `Lost`.
    #[instrument]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::Playing)
    }
}
